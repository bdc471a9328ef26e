/// Linear RGB vertex color.
pub type Color = rgb::RGB<f32>;
