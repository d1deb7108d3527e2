pub mod impl_fake;
pub mod impl_v4l;
pub mod interface;
