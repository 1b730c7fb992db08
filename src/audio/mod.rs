pub mod file;
pub mod pcm;
pub mod resample;

pub use file::AudioFile;
pub use pcm::{decode_pcm16, downmix, f32_to_pcm16_bytes};
pub use resample::resample;
