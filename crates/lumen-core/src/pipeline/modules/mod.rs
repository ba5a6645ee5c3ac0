mod base;
mod clarity;
mod dramatic;
mod temperature;
mod tone;
mod vibrance;
mod vignette;
mod vintage;

pub use base::BaseAdjust;
pub use clarity::{Clarity, ClarityMode};
pub use dramatic::Dramatic;
pub use temperature::Temperature;
pub use tone::ToneBands;
pub use vibrance::Vibrance;
pub use vignette::Vignette;
pub use vintage::Vintage;
