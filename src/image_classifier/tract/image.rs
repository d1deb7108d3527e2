use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Crops the largest centered square, the framing the model was trained on.
pub fn crop_center_square(image: &DynamicImage) -> DynamicImage {
    let side = image.width().min(image.height());
    let x_offset = (image.width() - side) / 2;
    let y_offset = (image.height() - side) / 2;
    image.crop_imm(x_offset, y_offset, side, side)
}

pub fn resize_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    crop_center_square(image).resize_exact(width, height, imageops::FilterType::Triangle)
}

// NHWC, scaled to [-1, 1]
fn image_to_tensor(
    image: &DynamicImage,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let mut tensor = Tensor::zero::<f32>(&[1, height, width, 3])?;
    let slice = tensor.as_slice_mut::<f32>()?;

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let base = (y as usize * width + x as usize) * 3;
        for c in 0..3 {
            slice[base + c] = pixel[c] as f32 / 127.5 - 1.0;
        }
    }

    Ok(tensor)
}

pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let resized = resize_image(image, width, height);
    let tensor = image_to_tensor(&resized)?;

    Ok(tensor)
}
