//! Process-wide reference table, loaded once on first use.

use std::path::Path;

use once_cell::sync::OnceCell;

use crate::{error::ColorError, table::ColorTable};

static TABLE: OnceCell<ColorTable> = OnceCell::new();

/// Load the table from `path` unless one is already cached, in which case
/// the cached table is returned and `path` is not read. A failed load
/// leaves nothing cached, so the next call tries again.
pub fn load(path: impl AsRef<Path>) -> Result<&'static ColorTable, ColorError> {
    TABLE.get_or_try_init(|| ColorTable::load(path))
}

/// The cached table, if a load has succeeded.
pub fn get() -> Option<&'static ColorTable> {
    TABLE.get()
}
