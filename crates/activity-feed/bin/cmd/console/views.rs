pub(crate) mod bottom_bar;
pub(crate) mod feed;
pub(crate) mod filters;
pub(crate) mod inspect;
pub(crate) mod main_view;
