mod assignments;
mod gigs;
mod singers;

pub(crate) use assignments::AssignmentModel;
pub(crate) use gigs::GigModel;
pub(crate) use singers::SingerModel;
