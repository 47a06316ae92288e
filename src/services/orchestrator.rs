use crate::config::DockConfig;
use crate::host::{HostEvent, HostServices, IconClickHandler};
use crate::services::{
    activation::ActivationDispatcher, dock_controller::DockVisibilityController,
    edge_trigger::{EdgeGesture, EdgeTriggerManager},
};
use crate::{DockError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Wires host notifications to the trigger manager, the dock controller and
/// the click dispatcher
pub struct DockOrchestrator {
    config: DockConfig,
    host: HostServices,
    dispatcher: Arc<ActivationDispatcher>,
    controller: DockVisibilityController,
    triggers: EdgeTriggerManager,
    previous_click_handler: Option<Arc<dyn IconClickHandler>>,
    enabled: bool,
}

impl DockOrchestrator {
    pub fn new(config: DockConfig, host: HostServices) -> Self {
        let dispatcher = Arc::new(ActivationDispatcher::new(
            host.windows.clone(),
            host.overview.clone(),
        ));
        let controller = DockVisibilityController::new(
            config.dock.clone(),
            host.surface.clone(),
            host.timers.clone(),
        );
        let triggers = EdgeTriggerManager::new(
            config.edge.clone(),
            host.display.clone(),
            host.barriers.clone(),
            host.timers.clone(),
            host.overview.clone(),
        );

        Self {
            config,
            host,
            dispatcher,
            controller,
            triggers,
            previous_click_handler: None,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn controller(&self) -> &DockVisibilityController {
        &self.controller
    }

    pub fn triggers(&self) -> &EdgeTriggerManager {
        &self.triggers
    }

    /// Install the click dispatcher, place the dock and arm the edge triggers
    pub fn enable(&mut self) -> Result<()> {
        if self.enabled {
            return Ok(());
        }

        self.config.validate().map_err(|problems| {
            DockError::ConfigurationError(problems.join("; "))
        })?;

        self.install();
        self.refresh_geometry();
        self.rebuild_triggers();
        self.enabled = true;

        info!("Dock enabled");
        Ok(())
    }

    /// Undo everything `enable` did; safe to call repeatedly
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }

        self.uninstall();
        self.triggers.teardown();
        self.controller.teardown();
        self.enabled = false;

        info!("Dock disabled");
    }

    /// Replace the launcher's click handler with the dispatcher
    pub fn install(&mut self) {
        if self.previous_click_handler.is_some() {
            return;
        }
        let handler: Arc<dyn IconClickHandler> = self.dispatcher.clone();
        self.previous_click_handler = Some(self.host.icons.replace_click_handler(handler));
    }

    /// Restore the handler that was active before `install`, returning the dispatcher it displaced
    pub fn uninstall(&mut self) -> Option<Arc<dyn IconClickHandler>> {
        let previous = self.previous_click_handler.take()?;
        Some(self.host.icons.replace_click_handler(previous))
    }

    /// Route one host notification; ignored while disabled
    pub fn handle_event(&mut self, event: HostEvent) {
        if !self.enabled {
            debug!(?event, "Event ignored while disabled");
            return;
        }

        match event {
            HostEvent::MonitorsChanged => self.rebuild_triggers(),
            HostEvent::WorkAreasChanged => self.refresh_geometry(),
            HostEvent::PointerEnteredZone(zone) => self.triggers.on_pointer_enter(zone),
            HostEvent::PointerLeftZone(zone) => self.triggers.on_pointer_leave(zone),
            HostEvent::BarrierTriggered(barrier) => {
                if let Some(gesture) = self.triggers.on_barrier_triggered(barrier) {
                    self.on_gesture(gesture);
                }
            }
            HostEvent::TimerFired(timer) => {
                if let Some(gesture) = self.triggers.on_timer(timer) {
                    self.on_gesture(gesture);
                } else {
                    self.controller.on_timer(timer);
                }
            }
            HostEvent::AnimationCompleted(animation) => {
                self.controller.on_animation_complete(animation);
            }
            HostEvent::DockHoverChanged(hovered) => self.controller.on_hover_changed(hovered),
            HostEvent::ItemMenuChanged { item, opened } => {
                self.controller.on_item_menu_changed(item, opened)
            }
            HostEvent::DockScrolled(direction) => {
                if let Some(motion) = direction.workspace_motion() {
                    self.host.windows.activate_workspace_neighbor(motion);
                }
            }
            HostEvent::ShowAppsClicked => self.host.overview.show_apps(),
            HostEvent::OverviewShown => self.controller.dismiss(),
            HostEvent::StartupComplete => {
                if !self.config.show_overview_at_startup {
                    self.host.overview.hide();
                }
            }
        }
    }

    fn on_gesture(&mut self, gesture: EdgeGesture) {
        if self.host.overview.is_visible() {
            debug!(monitor = gesture.monitor_index, "Gesture ignored while overview is visible");
            return;
        }
        self.controller.toggle();
    }

    fn refresh_geometry(&mut self) {
        let primary = self.host.display.primary_monitor();
        self.controller.refresh(self.host.display.work_area(primary));
    }

    fn rebuild_triggers(&mut self) {
        let layout = self.host.display.monitors();
        self.triggers.build(&layout);
    }
}

impl Drop for DockOrchestrator {
    fn drop(&mut self) {
        self.disable();
    }
}
