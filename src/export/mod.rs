pub(crate) mod ffmpeg;
pub(crate) mod generate;
pub(crate) mod raster;
pub(crate) mod sink;
