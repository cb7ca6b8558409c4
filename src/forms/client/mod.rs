mod add;
mod edit;

pub use add::AddClient as Add;
pub use edit::EditClient as Edit;
