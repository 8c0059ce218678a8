pub mod calculations;
pub mod format;
pub mod input;
pub mod models;
pub mod session;

pub use calculations::{TipCalculationError, calculate, compute_outputs};
pub use format::{CurrencyFormat, CurrencyFormatter, OutputLabels, SymbolPosition};
pub use input::NormalizeError;
pub use models::*;
pub use session::{MemoryBundle, SessionError, SliderUpdate, StateBundle, TextUpdate, TipSession};
