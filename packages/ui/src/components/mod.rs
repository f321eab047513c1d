//! Presentation primitives. No data access, no state beyond what is passed in.

mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::{Input, Label, TextArea};

mod card;
pub use card::Card;

pub mod table;
pub use table::{HeaderCell, Table, TableBody, TableCell, TableHead, TableRow};

mod skeleton;
pub use skeleton::SkeletonTable;

mod modal;
pub use modal::Modal;
