mod add;
mod status;

pub use add::AddWorkOrder as Add;
pub use status::ChangeStatus;
