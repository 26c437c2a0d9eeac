mod certificate;
mod device;
mod platform;

pub use certificate::*;
pub use device::*;
pub use platform::*;
