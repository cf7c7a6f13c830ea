use std::fs::File;
use std::io::{self, Cursor, Read};

/// Gets a sequential reader over a reference file
///
/// Reference files are read front to back exactly once, so on unix the file is memory mapped with
/// sequential access advice
pub fn get_reader(file: File) -> io::Result<Box<dyn Read>> {
    // Mapping a zero length file is an error on most systems
    if file.metadata()?.len() == 0 {
        return Ok(Box::new(Cursor::new(Vec::new())));
    }
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        const BUFFER_SIZE: usize = 16 * 4096;
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
    #[cfg(unix)]
    {
        use memmap2::{Advice, Mmap};
        // SAFETY: the map is read only and lives no longer than the reader, the file is not
        // expected to be truncated while a simulation reads it
        let m = unsafe { Mmap::map(&file)? };
        m.advise(Advice::Sequential)?;
        Ok(Box::new(Cursor::new(m)))
    }
}
