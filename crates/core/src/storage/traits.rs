//! Storage traits
//!
//! The controller only needs load/save by period key. Implementations
//! decide where periods live (JSON files, memory, something else) and are
//! responsible for serializing writers to the same key.

use crate::error::Result;
use crate::models::{Period, PeriodKey};

/// Period persistence operations
pub trait PeriodStore {
    /// Find a period by key
    fn load(&self, key: &PeriodKey) -> Result<Option<Period>>;

    /// Create or replace the stored record for `period.key`
    fn save(&self, period: &Period) -> Result<()>;
}

impl<T: PeriodStore + ?Sized> PeriodStore for &T {
    fn load(&self, key: &PeriodKey) -> Result<Option<Period>> {
        (**self).load(key)
    }

    fn save(&self, period: &Period) -> Result<()> {
        (**self).save(period)
    }
}
