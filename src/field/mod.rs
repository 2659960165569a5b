// Editable-value controller: raw typed text reconciled with a formatted value

pub mod input;
pub mod presentation;
pub mod shared;
pub mod state;


pub use input::FormattedInput;
pub use presentation::Presentation;
pub use shared::{InputEvent, SharedInput};
pub use state::EditState;
