use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use log::debug;
use wallclock_proto::ports::surface::{DisplaySurface, SurfaceError};

/// In-memory text node.
///
/// Holds whatever was last written to it. Useful as a render target for
/// inspection and for hosts that poll the text themselves.
#[derive(Debug, Default)]
pub struct MemorySurface {
    content: RwLock<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: RwLock::new(text.into()),
        }
    }
}

impl DisplaySurface for MemorySurface {
    fn replace_text(&self, text: &str) -> Result<(), SurfaceError> {
        let mut content = self.content.write().map_err(|_| SurfaceError::Poisoned)?;
        content.clear();
        content.push_str(text);
        Ok(())
    }

    fn text(&self) -> Result<String, SurfaceError> {
        self.content
            .read()
            .map_err(|_| SurfaceError::Poisoned)
            .map(|content| content.clone())
    }
}

/// Identifier-to-surface lookup table standing in for the hosting document.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<String, Arc<dyn DisplaySurface>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `surface` under `id`, returning the surface it replaced.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        surface: Arc<dyn DisplaySurface>,
    ) -> Option<Arc<dyn DisplaySurface>> {
        let id = id.into();
        debug!("Registering display surface '{id}'");
        self.surfaces.insert(id, surface)
    }

    pub fn lookup(&self, id: &str) -> Option<Arc<dyn DisplaySurface>> {
        self.surfaces.get(id).map(Arc::clone)
    }

    pub fn remove(&mut self, id: &str) -> Option<Arc<dyn DisplaySurface>> {
        self.surfaces.remove(id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
