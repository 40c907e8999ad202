pub mod camera;
pub mod chapters;
pub mod character;
pub mod constants;
pub mod particles;
pub mod pose;
pub mod props;
pub mod render_list;
pub mod scene;
pub mod scroll;
pub mod state;
pub mod theme;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use camera::*;
pub use chapters::*;
pub use character::*;
pub use constants::*;
pub use particles::*;
pub use pose::*;
pub use props::*;
pub use render_list::*;
pub use scene::*;
pub use scroll::*;
pub use state::*;
pub use theme::*;
