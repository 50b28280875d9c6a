pub mod page_route;
