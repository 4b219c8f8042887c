pub mod iter;
pub mod set;
pub mod word;

pub use iter::Support;
pub use set::BitSet;
pub use word::Word;
