// LaTeX back-end: CvDocument in, complete .tex source out.
// Pure and infallible; compiling the output is the typeset module's job.

pub mod assembler;
pub mod dates;
pub mod escape;
pub mod handlers;
pub mod preamble;
pub mod sections;

pub use assembler::render;
pub use preamble::REQUIRED_PACKAGES;
