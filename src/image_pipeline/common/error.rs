use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Sample count {actual} does not match dimensions {width}x{height}x{bands}")]
    ShapeError {
        width: usize,
        height: usize,
        bands: usize,
        actual: usize,
    },

    #[error("Band index {index} out of range: band needs samples up to {needed}, file holds {available}")]
    BandIndexOutOfRange {
        index: usize,
        needed: usize,
        available: usize,
    },

    #[error("Operand shapes differ: {0}x{1} vs {2}x{3}")]
    ShapeMismatch(usize, usize, usize, usize),

    #[error("Expression references unresolved band '{0}'")]
    NameResolutionError(String),

    #[error("Failed to parse expression: {0}")]
    ExpressionError(String),

    #[error("Unsupported colormap: {0}")]
    UnsupportedColormap(String),

    #[error("Expected a 3-band RGB cube, got {0} bands")]
    NotRgbCube(usize),

    #[error("Failed to encode PNG image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
