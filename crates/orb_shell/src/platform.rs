use tracing::{info, warn};

use crate::store::{KeyValueStore, MemoryStore};

pub const FALLBACK_SCREEN_WIDTH: u32 = 320;
pub const FALLBACK_SCREEN_HEIGHT: u32 = 480;
pub const HIGH_SCORE_KEY: &str = "HighScore";

#[cfg(not(target_arch = "wasm32"))]
pub const STORE_FILE: &str = "orb_quest_store.json";

/// Host services the game relies on: the screen it is shown on and the
/// persisted high score.
pub trait Platform: Send + Sync + 'static {
    fn screen_width(&self) -> u32;
    fn screen_height(&self) -> u32;
    fn high_score(&self) -> u32;
    /// Persists `value` and hands it back. Failing to persist is not an error
    /// the game can act on, so implementations log and carry on.
    fn set_high_score(&mut self, value: u32) -> u32;
}

/// Platform used when no host is present: a fixed screen size and a local
/// key-value store for the high score.
#[derive(Debug)]
pub struct LocalPlatform<S: KeyValueStore> {
    store: S,
    screen_width: u32,
    screen_height: u32,
}

impl<S: KeyValueStore> LocalPlatform<S> {
    pub const fn new(store: S) -> Self {
        Self::with_screen(store, FALLBACK_SCREEN_WIDTH, FALLBACK_SCREEN_HEIGHT)
    }

    pub const fn with_screen(store: S, screen_width: u32, screen_height: u32) -> Self {
        Self {
            store,
            screen_width,
            screen_height,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl LocalPlatform<MemoryStore> {
    /// Nothing survives the process. Used by tests and as the last resort
    /// when no persistent store can be opened.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }
}

impl<S: KeyValueStore> Platform for LocalPlatform<S> {
    fn screen_width(&self) -> u32 {
        self.screen_width
    }

    fn screen_height(&self) -> u32 {
        self.screen_height
    }

    fn high_score(&self) -> u32 {
        match self.store.get(HIGH_SCORE_KEY) {
            // Not set yet, or written by something else: start from zero
            Ok(Some(value)) => value.trim().parse().unwrap_or_default(),
            Ok(None) => 0,
            Err(err) => {
                warn!("Could not read the high score: {err}");
                0
            }
        }
    }

    fn set_high_score(&mut self, value: u32) -> u32 {
        if let Err(err) = self.store.set(HIGH_SCORE_KEY, &value.to_string()) {
            warn!("High score {value} not saved: {err}");
        }
        value
    }
}

/// Picks the platform for the current target.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_platform() -> Box<dyn Platform> {
    match crate::store::FileStore::open(STORE_FILE) {
        Ok(store) => {
            info!("Keeping the high score in {}", store.path().display());
            Box::new(LocalPlatform::new(store))
        }
        Err(err) => {
            warn!("Falling back to an in-memory high score: {err}");
            Box::new(LocalPlatform::in_memory())
        }
    }
}

/// Picks the platform for the current target.
#[cfg(target_arch = "wasm32")]
pub fn default_platform() -> Box<dyn Platform> {
    let (width, height) = crate::window_resizing::browser_inner_size().map_or(
        (FALLBACK_SCREEN_WIDTH, FALLBACK_SCREEN_HEIGHT),
        |size| (size.x as u32, size.y as u32),
    );
    info!("Browser screen is {width}x{height}");
    Box::new(LocalPlatform::with_screen(
        crate::store::BrowserStore,
        width,
        height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn fallback_screen_is_320_by_480() {
        let platform = LocalPlatform::in_memory();
        assert_eq!(platform.screen_width(), 320, "fallback width");
        assert_eq!(platform.screen_height(), 480, "fallback height");
    }

    #[test]
    fn high_score_defaults_to_zero_and_round_trips() {
        let mut platform = LocalPlatform::in_memory();
        assert_eq!(platform.high_score(), 0, "nothing stored yet");
        assert_eq!(platform.set_high_score(9), 9, "setter echoes the value");
        assert_eq!(platform.high_score(), 9, "stored value is read back");
    }

    #[test]
    fn unparsable_high_score_reads_as_zero() {
        let mut store = MemoryStore::default();
        store.set(HIGH_SCORE_KEY, "lots").unwrap();
        let platform = LocalPlatform::new(store);
        assert_eq!(platform.high_score(), 0, "garbage is treated as unset");
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::StorageUnavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::StorageUnavailable)
        }
    }

    #[test]
    fn store_failures_are_tolerated() {
        let mut platform = LocalPlatform::new(BrokenStore);
        assert_eq!(platform.high_score(), 0, "unreadable store reads as zero");
        assert_eq!(
            platform.set_high_score(4),
            4,
            "unwritable store still echoes the value"
        );
    }
}
