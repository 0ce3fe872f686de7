// Adapters layer: concrete readers and writers for the supplier feed, the POS
// workbook and the report directory.

pub mod inventory;
pub mod layout;
pub mod storage;
pub mod supplier;
