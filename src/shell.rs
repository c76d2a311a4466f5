//! Line-oriented shell for poking at a container.
//!
//! Commands: `files`, `file:<name>`, `open:<path>`, `print:<n>`, `ls:<path>`, `quit`.

use std::io::{self, BufRead, Write};

use log::debug;

use crate::directory::file_size;
use crate::fs::{FileSystem, Handle};

pub struct Shell<'a> {
    fs: &'a FileSystem,
    current: Option<Handle<'a>>,
}

impl<'a> Shell<'a> {
    pub fn new(fs: &'a FileSystem) -> Self {
        Self { fs, current: None }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            if !self.execute(line?.trim(), &mut output)? {
                return Ok(());
            }
        }
    }

    /// Executes one command line. Returns `false` when the shell should stop.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        debug!("shell command {:?}", line);
        if line == "files" {
            for (slot, entry) in self.fs.container().used_entries() {
                writeln!(out, "{:3}. {}", slot, entry.name_str())?;
            }
        } else if let Some(name) = line.strip_prefix("file:") {
            self.describe(name.trim(), out)?;
        } else if let Some(path) = line.strip_prefix("open:") {
            let path = path.trim();
            match self.fs.open(path) {
                Ok(handle) => {
                    self.current = Some(handle);
                    writeln!(out, "Now open: {}", path)?;
                }
                Err(e) => writeln!(out, "could not open the file: {}", e)?,
            }
        } else if let Some(count) = line.strip_prefix("print:") {
            self.print(count.trim(), out)?;
        } else if let Some(path) = line.strip_prefix("ls:") {
            match self.fs.read_dir(path.trim()) {
                Ok(entries) => {
                    for meta in entries {
                        let marker = if meta.is_dir() { 'd' } else { '-' };
                        writeln!(out, "{} {:>10} {}", marker, meta.size, meta.name)?;
                    }
                }
                Err(e) => writeln!(out, "could not list: {}", e)?,
            }
        } else if line == "quit" {
            writeln!(out, "quitting")?;
            return Ok(false);
        } else {
            writeln!(out, "unrecognized command: {}", line)?;
        }
        Ok(true)
    }

    fn describe(&self, name: &str, out: &mut impl Write) -> io::Result<()> {
        let container = self.fs.container();
        let Some((slot, entry)) = container.find(name) else {
            return writeln!(out, "no such file: {}", name);
        };
        match file_size(container, slot, entry.first_block) {
            Ok(size) => {
                writeln!(out, "Name: {}", name)?;
                writeln!(out, "Size: {}", size)?;
                writeln!(out, " Dir: false")
            }
            Err(e) => writeln!(out, "could not stat the file: {}", e),
        }
    }

    fn print(&mut self, count: &str, out: &mut impl Write) -> io::Result<()> {
        let Ok(count) = count.parse::<usize>() else {
            return writeln!(out, "invalid byte count: {}", count);
        };
        let Some(handle) = self.current.as_mut() else {
            return writeln!(out, "no file is open");
        };
        let mut buf = vec![0; count];
        match handle.read(&mut buf) {
            Ok(chunk) => {
                writeln!(out, "{}", String::from_utf8_lossy(&buf[..chunk.len]))?;
                if chunk.eof {
                    writeln!(out, "<eof>")?;
                }
                Ok(())
            }
            Err(e) => writeln!(out, "could not read the file: {}", e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::container::Container;
    use crate::structs::{DataBlock, FileEntry};
    use std::io::Cursor;

    fn fs() -> FileSystem {
        FileSystem::new(
            Container::from_parts(
                vec![
                    FileEntry::UNUSED,
                    FileEntry::new("hi.txt", 1).unwrap(),
                    FileEntry::new("docs/a.md", 2).unwrap(),
                ],
                vec![
                    DataBlock::empty(0),
                    DataBlock::new(0, b"hello world").unwrap(),
                    DataBlock::new(0, b"# a").unwrap(),
                ],
            )
            .unwrap(),
        )
    }

    fn run(fs: &FileSystem, script: &str) -> String {
        let mut out = Vec::new();
        Shell::new(fs).run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_files() {
        let fs = fs();
        let out = run(&fs, "files\nquit\n");
        assert!(out.contains("  1. hi.txt\n"));
        assert!(out.contains("  2. docs/a.md\n"));
        assert!(out.ends_with("quitting\n"));
    }

    #[test]
    fn test_open_and_print() {
        let fs = fs();
        let out = run(&fs, "open:hi.txt\nprint:5\n");
        assert!(out.contains("Now open: hi.txt\n"));
        assert!(out.contains("> hello\n"));
        assert!(!out.contains("<eof>"));
    }

    #[test]
    fn test_print_to_end() {
        let fs = fs();
        let out = run(&fs, "open:hi.txt\nprint:5000\n");
        assert!(out.contains("<eof>"));
    }

    #[test]
    fn test_errors() {
        let fs = fs();
        let out = run(&fs, "print:3\nopen:missing\nprint:x\nbogus\n");
        assert!(out.contains("no file is open"));
        assert!(out.contains("could not open the file: not found: missing"));
        assert!(out.contains("invalid byte count: x"));
        assert!(out.contains("unrecognized command: bogus"));
    }

    #[test]
    fn test_print_directory() {
        let fs = fs();
        let out = run(&fs, "open:docs\nprint:4\n");
        assert!(out.contains("Now open: docs\n"));
        assert!(out.contains("could not read the file: is a directory: docs\n"));
    }

    #[test]
    fn test_file_and_ls() {
        let fs = fs();
        let out = run(&fs, "file:hi.txt\nls:\nls:docs\n");
        assert!(out.contains("Name: hi.txt\nSize: 4096\n Dir: false\n"));
        assert!(out.contains(&format!("- {:>10} hi.txt\n", 4096)));
        assert!(out.contains(&format!("d {:>10} docs\n", 0)));
        assert!(out.contains(&format!("- {:>10} a.md\n", 4096)));
    }
}
