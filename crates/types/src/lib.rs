pub mod auction;
pub mod call;
pub mod card;
pub mod hand;
pub mod io;
pub mod rank;
pub mod seat;
pub mod strain;
pub mod suit;

pub use auction::Auction;
pub use call::Call;
pub use card::Card;
pub use hand::{Distribution, Hand, Shape};
pub use rank::Rank;
pub use seat::Seat;
pub use strain::Strain;
pub use suit::Suit;
