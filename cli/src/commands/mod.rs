mod crc;
mod decrypt;
mod encrypt;
mod keygen;

pub use crc::crc;
pub use decrypt::decrypt;
pub use encrypt::encrypt;
pub use keygen::keygen;
