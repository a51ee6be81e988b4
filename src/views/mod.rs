//! Views: HTTP handlers and page assembly
//!
//! | Path                           | View                          |
//! |--------------------------------|-------------------------------|
//! | `/`                            | Landing page                  |
//! | `/:app_name/:model_name`       | Generic list view             |
//! | `/:app_name/:model_name/:id`   | Generic detail view           |
//! | `/plugins/installed-plugins`   | Registry listing              |
//! | `/plugins/{mount_path}`        | One per registered plugin     |
//! | `/health`                      | Health probe                  |

mod handler;
pub mod pages;

pub use handler::{views_router, AppState};
