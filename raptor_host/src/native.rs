//! Runtime loading of the native libraries and typed calls into their exports

use std::ffi::{c_char, c_int, CStr, OsString};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::{debug, info, warn};

use crate::error::{HostError, Result};

type AddNumbersFn = unsafe extern "C" fn(c_int, c_int) -> c_int;
type AddOneFn = unsafe extern "C" fn(c_int) -> c_int;
type MessageLengthFn = unsafe extern "C" fn() -> usize;
type FillStringFn = unsafe extern "C" fn(*mut c_char, usize);
type VersionFn = unsafe extern "C" fn() -> *const c_char;
type InitLoggingFn = unsafe extern "C" fn();

/// Where the two shared libraries live
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    pub companion: PathBuf,
    pub shim: PathBuf,
}

impl LibraryPaths {
    /// Platform file names (`lib<name>.so`, `<name>.dll`, ...) inside `dir`
    pub fn in_dir(dir: &Path, companion: &str, shim: &str) -> Self {
        LibraryPaths {
            companion: dir.join(platform_file_name(companion)),
            shim: dir.join(platform_file_name(shim)),
        }
    }
}

fn platform_file_name(name: &str) -> OsString {
    libloading::library_filename(name)
}

/// Both native libraries, kept loaded for as long as this value lives.
///
/// Fields drop in declaration order, so the shim unloads before the
/// companion it was loaded after.
#[derive(Debug)]
pub struct NativeLibraries {
    shim: Library,
    companion: Library,
}

impl NativeLibraries {
    /// Load the companion library first, then the shim
    pub fn load(paths: &LibraryPaths) -> Result<Self> {
        let companion = open(&paths.companion)?;
        let shim = open(&paths.shim)?;
        Ok(NativeLibraries { shim, companion })
    }

    /// The shim has its own copy of the tracing dispatcher, so its events
    /// only show up once it installs a subscriber of its own. Optional: a
    /// shim without the export is logged and skipped.
    pub fn init_native_logging(&self) {
        match symbol::<InitLoggingFn>(&self.shim, "raptorNativeInitLogging") {
            Ok(init) => unsafe { init() },
            Err(e) => warn!("{}", e),
        }
    }

    pub fn add_numbers(&self, a: i32, b: i32) -> Result<i32> {
        let add: Symbol<AddNumbersFn> = symbol(&self.shim, "addNumbers")?;
        Ok(unsafe { add(a, b) })
    }

    pub fn add_one(&self, x: i32) -> Result<i32> {
        let add_one: Symbol<AddOneFn> = symbol(&self.companion, "addOne")?;
        Ok(unsafe { add_one(x) })
    }

    pub fn message_length(&self) -> Result<usize> {
        let length: Symbol<MessageLengthFn> = symbol(&self.shim, "getMessageLength")?;
        Ok(unsafe { length() })
    }

    /// Call `fillString` with a freshly allocated buffer of `capacity` bytes
    /// and decode the result
    pub fn fill_string(&self, capacity: usize) -> Result<String> {
        if capacity == 0 {
            return Err(HostError::InvalidArgument(
                "buffer capacity must be at least 1".to_string(),
            ));
        }

        let fill: Symbol<FillStringFn> = symbol(&self.shim, "fillString")?;
        let mut buffer = vec![0u8; capacity];
        unsafe { fill(buffer.as_mut_ptr().cast::<c_char>(), buffer.len()) };

        c_string_to_string(&buffer)
    }

    pub fn shim_version(&self) -> Result<String> {
        let version: Symbol<VersionFn> = symbol(&self.shim, "raptorNativeVersion")?;
        let ptr = unsafe { version() };
        if ptr.is_null() {
            return Ok("unknown".to_string());
        }

        Ok(unsafe { CStr::from_ptr(ptr) }
            .to_string_lossy()
            .into_owned())
    }
}

fn open(path: &Path) -> Result<Library> {
    debug!("Loading {}", path.display());
    let library = unsafe { Library::new(path) }.map_err(|source| HostError::LibraryLoad {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {}", path.display());
    Ok(library)
}

fn symbol<'lib, T>(library: &'lib Library, name: &'static str) -> Result<Symbol<'lib, T>> {
    unsafe { library.get(name.as_bytes()) }
        .map_err(|source| HostError::MissingSymbol { name, source })
}

/// Decode a NUL-terminated byte buffer filled by native code.
///
/// Stops at the first NUL (or the end of the buffer if there is none),
/// replaces invalid UTF-8 and trims surrounding whitespace.
pub fn c_string_to_string(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(HostError::InvalidArgument(
            "C string buffer is empty".to_string(),
        ));
    }

    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    Ok(String::from_utf8_lossy(&bytes[..end]).trim().to_string())
}

/// Directory holding the workspace cdylibs built for the running tests.
///
/// Dev-dependency cdylibs land in `target/<profile>/deps`, next to the test
/// binary; a workspace-wide build also copies them up one level.
#[cfg(test)]
pub(crate) fn built_lib_dir() -> PathBuf {
    let exe = std::env::current_exe().unwrap();
    let deps = exe.parent().unwrap();

    let dir = [Some(deps), deps.parent()]
        .into_iter()
        .flatten()
        .find(|dir| {
            let paths = LibraryPaths::in_dir(dir, "raptor_other", "raptor_native");
            paths.companion.exists() && paths.shim.exists()
        })
        .map(Path::to_path_buf)
        .unwrap_or_else(|| panic!("raptor cdylibs not found near {}", exe.display()));
    dir
}
