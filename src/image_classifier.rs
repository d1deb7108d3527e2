pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod interface;
pub mod models {
    pub mod model_config;
}
pub mod tract {
    pub mod image;
}
