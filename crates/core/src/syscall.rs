//! Syscall-spam workload.
//!
//! Issues kernel round trips against one scratch file as fast as the slot
//! sequence allows. A floating-point value is threaded through every
//! operation (offsets derive from it, writes derive from it, each operation
//! square-roots it afterwards), so no call can be proven redundant and
//! elided, and consecutive operations form a data dependency chain through
//! user space.
//!
//! Unlike the in-memory families, this one can fail mid-run; errors name the
//! failing call and the file and are fatal to the measurement.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use stresskit_common::{Noise, StressError, StressResult};
use stresskit_domain::constants::SYSCALL_VALUE_BOUND;
use stresskit_domain::SyscallConfig;

use crate::errors::WorkloadResult;
use crate::slots::Nop;

/// The scratch file and the value threaded through the slot sequence.
#[derive(Debug)]
pub struct FileState {
    file: File,
    path: PathBuf,
    value: f64,
}

impl FileState {
    /// Open the scratch file read-write, creating it when absent. The file
    /// is not truncated so reads can observe earlier writes.
    pub fn open(config: &SyscallConfig) -> WorkloadResult<Self> {
        config.validate()?;
        Self::open_at(Path::new(&config.file_name))
    }

    /// Open against an explicit path (tests point this at a temp dir).
    pub fn open_at(path: &Path) -> WorkloadResult<Self> {
        let file = open_scratch(path)?;
        tracing::debug!(path = %path.display(), "scratch file opened");
        Ok(Self { file, path: path.to_path_buf(), value: 0.0 })
    }

    /// The threaded value after the last operation.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Path of the scratch file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the scratch file. Finite runs call this after reporting.
    pub fn remove(self) -> StressResult<()> {
        drop(self.file);
        std::fs::remove_file(&self.path).map_err(|e| StressError::io("remove", &self.path, e))
    }

    fn seek(&mut self) -> StressResult<()> {
        let offset = self.value as u64;
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| StressError::io("seek", &self.path, e))?;
        self.value = self.value.sqrt();
        Ok(())
    }

    fn read_byte(&mut self) -> StressResult<()> {
        let mut byte = [0u8; 1];
        let n = self
            .file
            .read(&mut byte)
            .map_err(|e| StressError::io("read", &self.path, e))?;
        // At end of file the read returns no byte; the chain restarts at 0.
        self.value = if n == 0 { 0.0 } else { f64::from(byte[0]).sqrt() };
        Ok(())
    }

    fn write_byte(&mut self) -> StressResult<()> {
        let byte = [(self.value as u64 % 128) as u8];
        self.file
            .write_all(&byte)
            .map_err(|e| StressError::io("write", &self.path, e))?;
        self.value = self.value.sqrt();
        Ok(())
    }

    fn reopen(&mut self) -> StressResult<()> {
        self.file = open_scratch(&self.path)?;
        self.value = self.value.sqrt();
        Ok(())
    }
}

fn open_scratch(path: &Path) -> StressResult<File> {
    // Existing contents survive a reopen, so reads can still observe bytes
    // written through the previous descriptor.
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| StressError::io("open", path, e))
}

/// One per-iteration operation of the syscall family.
pub trait FileSlot {
    fn apply(state: &mut FileState) -> StressResult<()>;
}

/// Seek to the offset the threaded value names.
#[derive(Debug, Clone, Copy)]
pub struct Seeker;

/// Read one byte at the current position.
#[derive(Debug, Clone, Copy)]
pub struct Reader;

/// Write one value-derived byte at the current position.
#[derive(Debug, Clone, Copy)]
pub struct Writer;

/// Close and reopen the scratch file, forcing a fresh descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Reopen;

impl FileSlot for Seeker {
    #[inline(always)]
    fn apply(state: &mut FileState) -> StressResult<()> {
        state.seek()
    }
}

impl FileSlot for Reader {
    #[inline(always)]
    fn apply(state: &mut FileState) -> StressResult<()> {
        state.read_byte()
    }
}

impl FileSlot for Writer {
    #[inline(always)]
    fn apply(state: &mut FileState) -> StressResult<()> {
        state.write_byte()
    }
}

impl FileSlot for Reopen {
    #[inline(always)]
    fn apply(state: &mut FileState) -> StressResult<()> {
        state.reopen()
    }
}

impl FileSlot for Nop {
    #[inline(always)]
    fn apply(_state: &mut FileState) -> StressResult<()> {
        Ok(())
    }
}

#[inline(always)]
fn one_iteration<S1, S2, S3, S4, S5>(state: &mut FileState, noise: &mut Noise) -> StressResult<()>
where
    S1: FileSlot,
    S2: FileSlot,
    S3: FileSlot,
    S4: FileSlot,
    S5: FileSlot,
{
    // Fresh random value each iteration; the slots then chain off it.
    state.value = noise.below(SYSCALL_VALUE_BOUND) as f64;
    S1::apply(state)?;
    S2::apply(state)?;
    S3::apply(state)?;
    S4::apply(state)?;
    S5::apply(state)?;
    Ok(())
}

/// Run the resolved slot sequence for `bound` iterations, or forever. The
/// first I/O failure aborts the run.
pub fn run<S1, S2, S3, S4, S5>(
    state: &mut FileState,
    noise: &mut Noise,
    bound: Option<u64>,
) -> StressResult<()>
where
    S1: FileSlot,
    S2: FileSlot,
    S3: FileSlot,
    S4: FileSlot,
    S5: FileSlot,
{
    match bound {
        Some(n) => {
            for _ in 0..n {
                one_iteration::<S1, S2, S3, S4, S5>(state, noise)?;
            }
        }
        None => loop {
            one_iteration::<S1, S2, S3, S4, S5>(state, noise)?;
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for syscall.
    use std::io::{Read as _, Seek as _, SeekFrom};

    use super::*;

    fn scratch() -> (tempfile::TempDir, FileState) {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = FileState::open_at(&dir.path().join("scratch.dat")).expect("open");
        (dir, state)
    }

    /// Validates the seek-then-write chain: the written byte lands at the
    /// offset the threaded value named, and equals that value modulo 128
    /// after one square root.
    #[test]
    fn test_seek_write_lands_at_value_offset() {
        let (_dir, mut state) = scratch();
        state.value = 9.0;
        state.seek().expect("seek");
        // seek square-roots the value: 9 -> 3; the write emits 3 % 128.
        state.write_byte().expect("write");

        let mut file = File::open(state.path()).expect("reopen for check");
        file.seek(SeekFrom::Start(9)).expect("seek");
        let mut byte = [0u8; 1];
        file.read_exact(&mut byte).expect("read back");
        assert_eq!(byte[0], 3);
    }

    /// Validates the end-of-file read contract: a read past the data is not
    /// an error, it resets the threaded value to zero.
    #[test]
    fn test_read_at_eof_resets_value() {
        let (_dir, mut state) = scratch();
        state.value = 100.0;
        state.read_byte().expect("read");
        assert_eq!(state.value(), 0.0);
    }

    /// Validates a read mid-file square-roots the byte it observed.
    #[test]
    fn test_read_takes_sqrt_of_byte() {
        let (_dir, mut state) = scratch();
        state.value = 16.0;
        state.write_byte().expect("write 16 % 128");
        state.seek_to_start_for_test();

        state.read_byte().expect("read");
        assert_eq!(state.value(), 4.0);
    }

    /// Validates `reopen` yields a descriptor positioned at the start.
    #[test]
    fn test_reopen_rewinds_position() {
        let (_dir, mut state) = scratch();
        state.value = 7.0;
        state.write_byte().expect("write");
        state.reopen().expect("reopen");

        state.read_byte().expect("read");
        assert_eq!(state.value(), 7.0f64.sqrt());
    }

    /// Validates a full bounded run with every operation selected completes
    /// without error and leaves the scratch file removable.
    #[test]
    fn test_full_slot_run_and_cleanup() {
        let (_dir, mut state) = scratch();
        let mut noise = Noise::seeded(31);
        run::<Seeker, Writer, Reader, Reopen, Nop>(&mut state, &mut noise, Some(200))
            .expect("run");

        let path = state.path().to_path_buf();
        state.remove().expect("remove");
        assert!(!path.exists());
    }

    impl FileState {
        fn seek_to_start_for_test(&mut self) {
            self.file.seek(SeekFrom::Start(0)).expect("rewind");
        }
    }
}
