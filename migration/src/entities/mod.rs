pub mod page;
pub mod page_view;

pub use page::Entity as PageEntity;
pub use page_view::Entity as PageViewEntity;
