//! In-memory period store (tests and embedding)

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::{Period, PeriodKey};

use super::PeriodStore;

/// Periods kept in a map behind a mutex
#[derive(Debug, Default)]
pub struct MemoryStore {
    periods: Mutex<HashMap<PeriodKey, Period>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing periods
    pub fn with_periods(periods: impl IntoIterator<Item = Period>) -> Self {
        let periods = periods.into_iter().map(|p| (p.key, p)).collect();
        Self {
            periods: Mutex::new(periods),
        }
    }

    pub fn len(&self) -> usize {
        self.periods.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PeriodStore for MemoryStore {
    fn load(&self, key: &PeriodKey) -> Result<Option<Period>> {
        let periods = self
            .periods
            .lock()
            .map_err(|_| Error::Persistence("period map lock poisoned".into()))?;
        Ok(periods.get(key).cloned())
    }

    fn save(&self, period: &Period) -> Result<()> {
        let mut periods = self
            .periods
            .lock()
            .map_err(|_| Error::Persistence("period map lock poisoned".into()))?;
        periods.insert(period.key, period.clone());
        Ok(())
    }
}
