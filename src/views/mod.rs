mod cards;
mod detail;

pub use cards::CardListView;
pub use detail::DetailView;
