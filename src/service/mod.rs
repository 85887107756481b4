//! CrudService: generic resource operations over the document store.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::RequestValidator;
