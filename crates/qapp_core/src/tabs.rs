//! Archive viewer tabs.
//!
//! [`TabManager`] is the only owner of the tab collection, the active-pane
//! pointer and the transient resource handles attached to tab frames. Callers
//! see tabs through the view model and change them through the operations
//! below; there is no raw collection access.

use qapp_logging::{qapp_debug, qapp_info};

use crate::{ContentOutcome, ContentSource, Placeholder};

pub type TabId = u64;
pub type ResourceId = u64;

/// Transient, locally addressable copy of fetched archive content.
///
/// A handle is owned by exactly one tab frame and must be released when it is
/// superseded or the tab closes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle {
    id: ResourceId,
}

impl ResourceHandle {
    pub fn new(id: ResourceId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn url(&self) -> String {
        format!("blob:qapp/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shown {
    Blank,
    Resource(ResourceHandle, ContentSource),
    Placeholder(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) shown: Shown,
    /// Assigned to the frame but not yet reported loaded.
    pub(crate) incoming: Option<(ResourceHandle, ContentSource)>,
    pub(crate) resolving: bool,
}

impl Frame {
    fn blank() -> Self {
        Self {
            shown: Shown::Blank,
            incoming: None,
            resolving: false,
        }
    }

    fn drain_handles(&mut self) -> Vec<ResourceHandle> {
        let mut released = Vec::new();
        if let Some((handle, _)) = self.incoming.take() {
            released.push(handle);
        }
        if let Shown::Resource(handle, _) = std::mem::replace(&mut self.shown, Shown::Blank) {
            released.push(handle);
        }
        released
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArchiveTab {
    pub(crate) id: TabId,
    pub(crate) url: String,
    pub(crate) path: String,
    pub(crate) created_at: String,
    pub(crate) refreshed_at: Option<String>,
    pub(crate) title: Option<String>,
    generation: u64,
    pub(crate) frame: Frame,
}

/// A resolution the caller must start for a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub tab_id: TabId,
    pub generation: u64,
    pub path: String,
}

/// Handle bookkeeping produced by a completed resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    /// Newly allocated handle and the body it stands for.
    pub attach: Option<(ResourceHandle, String)>,
    pub release: Vec<ResourceHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabManager {
    tabs: Vec<ArchiveTab>,
    /// `None` means the default controls pane is showing.
    active: Option<TabId>,
    next_tab_id: TabId,
    next_resource_id: ResourceId,
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TabManager {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            next_tab_id: 1,
            next_resource_id: 1,
        }
    }

    /// Registers a tab with a blank frame. The tab is not activated.
    pub fn open(&mut self, url: &str, path: &str, created_at: &str) -> TabId {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        self.tabs.push(ArchiveTab {
            id,
            url: url.to_string(),
            path: path.to_string(),
            created_at: created_at.to_string(),
            refreshed_at: None,
            title: None,
            generation: 0,
            frame: Frame::blank(),
        });
        qapp_info!("opened archive tab {} for {}", id, path);
        id
    }

    /// Makes `tab_id` the only active pane. Unknown ids are ignored.
    pub fn switch_to(&mut self, tab_id: TabId) -> bool {
        if !self.contains(tab_id) {
            qapp_debug!("switch to unknown tab {} ignored", tab_id);
            return false;
        }
        self.active = Some(tab_id);
        true
    }

    /// Activates the default controls pane.
    pub fn show_controls(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<TabId> {
        self.active
    }

    pub fn contains(&self, tab_id: TabId) -> bool {
        self.tabs.iter().any(|tab| tab.id == tab_id)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Removes the tab and returns every handle it still held, or `None` for
    /// an unknown id. Closing the active tab falls back to the controls pane.
    pub fn close(&mut self, tab_id: TabId) -> Option<Vec<ResourceHandle>> {
        let index = self.tabs.iter().position(|tab| tab.id == tab_id)?;
        let mut tab = self.tabs.remove(index);
        if self.active == Some(tab_id) {
            self.active = None;
        }
        qapp_info!("closed archive tab {}", tab_id);
        Some(tab.frame.drain_handles())
    }

    /// Starts a new resolution for the tab's path. Any result still pending
    /// from an earlier generation will be dropped on arrival.
    pub fn refresh(&mut self, tab_id: TabId) -> Option<ResolveRequest> {
        let tab = self.tab_mut(tab_id)?;
        tab.generation += 1;
        tab.frame.resolving = true;
        Some(ResolveRequest {
            tab_id,
            generation: tab.generation,
            path: tab.path.clone(),
        })
    }

    /// Materializes a resolution result into the tab frame.
    ///
    /// Results for closed tabs or superseded generations return `None` and
    /// allocate nothing. A handle that was assigned but never loaded is
    /// released right away when superseded; the displayed one stays until
    /// its successor reports loaded.
    pub fn complete_resolution(
        &mut self,
        tab_id: TabId,
        generation: u64,
        outcome: ContentOutcome,
        at: &str,
    ) -> Option<Assignment> {
        let next_resource_id = self.next_resource_id;
        let tab = self.tab_mut(tab_id)?;
        if tab.generation != generation {
            qapp_debug!(
                "dropping stale resolution for tab {} (generation {} != {})",
                tab_id,
                generation,
                tab.generation
            );
            return None;
        }
        tab.frame.resolving = false;
        tab.refreshed_at = Some(at.to_string());

        let mut assignment = Assignment::default();
        match outcome {
            ContentOutcome::Resolved {
                source,
                body,
                title,
            } => {
                if title.is_some() {
                    tab.title = title;
                }
                let handle = ResourceHandle::new(next_resource_id);
                let previous = tab.frame.incoming.replace((handle.clone(), source));
                if let Some((superseded, _)) = previous {
                    assignment.release.push(superseded);
                }
                assignment.attach = Some((handle, body));
            }
            ContentOutcome::NotFound => {
                assignment.release = tab.frame.drain_handles();
                tab.frame.shown = Shown::Placeholder(Placeholder::NotFound);
            }
            ContentOutcome::Failed(_) => {
                assignment.release = tab.frame.drain_handles();
                tab.frame.shown = Shown::Placeholder(Placeholder::Error);
            }
        }
        if assignment.attach.is_some() {
            self.next_resource_id += 1;
        }
        Some(assignment)
    }

    /// Records that the frame finished loading `handle`. Returns the
    /// previously displayed handle, which is now safe to release.
    pub fn frame_loaded(&mut self, tab_id: TabId, handle: &ResourceHandle) -> Vec<ResourceHandle> {
        let Some(tab) = self.tab_mut(tab_id) else {
            return Vec::new();
        };
        let source = match &tab.frame.incoming {
            Some((incoming, source)) if incoming == handle => *source,
            _ => return Vec::new(),
        };
        tab.frame.incoming = None;
        match std::mem::replace(
            &mut tab.frame.shown,
            Shown::Resource(handle.clone(), source),
        ) {
            Shown::Resource(previous, _) => vec![previous],
            Shown::Blank | Shown::Placeholder(_) => Vec::new(),
        }
    }

    /// Handle to open in a new top-level context, if the frame displays
    /// resolved content.
    pub fn pop_out(&self, tab_id: TabId) -> Option<ResourceHandle> {
        let tab = self.tab(tab_id)?;
        match &tab.frame.shown {
            Shown::Resource(handle, _) => Some(handle.clone()),
            Shown::Blank | Shown::Placeholder(_) => None,
        }
    }

    /// Handles currently held by the tab, displayed first.
    pub fn live_handles(&self, tab_id: TabId) -> Vec<ResourceHandle> {
        let Some(tab) = self.tab(tab_id) else {
            return Vec::new();
        };
        let mut handles = Vec::new();
        if let Shown::Resource(handle, _) = &tab.frame.shown {
            handles.push(handle.clone());
        }
        handles.extend(tab.frame.incoming.iter().map(|(handle, _)| handle.clone()));
        handles
    }

    pub fn url(&self, tab_id: TabId) -> Option<&str> {
        self.tab(tab_id).map(|tab| tab.url.as_str())
    }

    pub fn title(&self, tab_id: TabId) -> Option<&str> {
        self.tab(tab_id).and_then(|tab| tab.title.as_deref())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ArchiveTab> {
        self.tabs.iter()
    }

    fn tab(&self, tab_id: TabId) -> Option<&ArchiveTab> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }

    fn tab_mut(&mut self, tab_id: TabId) -> Option<&mut ArchiveTab> {
        self.tabs.iter_mut().find(|tab| tab.id == tab_id)
    }
}
