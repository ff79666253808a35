pub mod canvas;
pub(crate) mod composite;
pub mod compositor;
pub mod stroke;
pub mod transform;
