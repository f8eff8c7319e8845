//! Plugin shell: one [`TitleGuard`] per open document view.
//!
//! The host calls [`TitlePlugin::on_view_created`] whenever it builds a view
//! and [`TitlePlugin::on_view_closed`] when the view goes away. Unloading the
//! plugin detaches every guard that is still alive.

use crate::config::GuardConfig;
use crate::error::Result;
use crate::filename::rejection_message;
use crate::guard::TitleGuard;
use crate::host::{EditorView, TooltipDisplay};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};
use uuid::Uuid;

pub struct TitlePlugin {
    config: GuardConfig,
    tooltip: Rc<dyn TooltipDisplay>,
    guards: HashMap<Uuid, TitleGuard>,
}

impl TitlePlugin {
    pub fn new(config: GuardConfig, tooltip: Rc<dyn TooltipDisplay>) -> Self {
        Self {
            config,
            tooltip,
            guards: HashMap::new(),
        }
    }

    /// Attaches a guard to the title of `view` and returns the id the view is
    /// tracked under. An attach failure is returned as-is for the host to
    /// report as a load error.
    pub fn on_view_created(&mut self, view: &dyn EditorView) -> Result<Uuid> {
        let guard = TitleGuard::attach(view, self.tooltip.clone(), &self.config)?;
        let id = Uuid::new_v4();
        self.guards.insert(id, guard);
        debug!(%id, open = self.guards.len(), "view attached");
        Ok(id)
    }

    /// Detaches and forgets the guard for `id`. Returns `false` for an
    /// unknown id.
    pub fn on_view_closed(&mut self, id: &Uuid) -> bool {
        match self.guards.remove(id) {
            Some(mut guard) => {
                guard.detach();
                debug!(%id, open = self.guards.len(), "view closed");
                true
            }
            None => false,
        }
    }

    /// Diagnostic hook for completed renames.
    pub fn on_rename(&self, name: &str) {
        match rejection_message(name) {
            Some(problem) => warn!(name, problem, "host committed an invalid title"),
            None => debug!(name, "rename occurred"),
        }
    }

    pub fn guard(&self, id: &Uuid) -> Option<&TitleGuard> {
        self.guards.get(id)
    }

    pub fn open_views(&self) -> usize {
        self.guards.len()
    }

    /// Detaches every guard.
    pub fn unload(&mut self) {
        for (_, mut guard) in self.guards.drain() {
            guard.detach();
        }
        debug!("plugin unloaded");
    }
}

impl Drop for TitlePlugin {
    fn drop(&mut self) {
        self.unload();
    }
}
