use std::io;
use std::path::{Path, PathBuf};

/// Reads a corpus file and returns one sample per line.
///
/// - Reads the entire file into memory (the pipeline is batch-oriented)
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let contents = std::fs::read_to_string(filename)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds a sibling path for an input path with a new extension.
///
/// Example:
/// `data/forum.txt` + `"bin"` → `data/forum.bin`
pub(crate) fn sibling_with_extension<P: AsRef<Path>>(
	input_path: P,
	extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(extension);

	Ok(output)
}

/// Extracts the base filename without extension, used as a model source name.
///
/// Examples:
/// - `"./data/forum.txt"` → `"forum"`
/// - `"forum.txt"` → `"forum"`
pub(crate) fn source_name<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}
