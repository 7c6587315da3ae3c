// Batch card preview: ring, stat rows and label fits for many cards in one call.
// Batches run on the blocking pool so large grids never stall the executor.

pub mod handlers;
pub mod preview;
