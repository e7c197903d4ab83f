pub mod posters;

use std::sync::Arc;

use posterboard_kernel::settings::Settings;
use posterboard_kernel::ModuleRegistry;

use posters::repository::PosterRepository;

/// Register all project-specific modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    settings: &Settings,
    poster_repo: Arc<dyn PosterRepository>,
) {
    registry.register(posters::create_module(poster_repo, &settings.posters));
}
