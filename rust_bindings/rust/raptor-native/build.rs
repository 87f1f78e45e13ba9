use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/ffi.rs");
    println!("cargo:rerun-if-env-changed=RAPTOR_NATIVE_HEADER_DIR");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap()).join("raptor_native.h");

    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        include_guard: Some("RAPTOR_NATIVE_H".to_string()),
        cpp_compat: true,
        documentation: true,
        usize_is_size_t: true,
        ..Default::default()
    };

    // Generate the C header for the exported symbols
    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate();

    let bindings = match bindings {
        Ok(bindings) => bindings,
        Err(e) => {
            // Don't fail the build, the library itself does not need the header
            println!("cargo:warning=C header not generated: {}", e);
            return;
        }
    };

    bindings.write_to_file(&out_path);

    // Optionally publish the header next to the host that consumes it
    if let Ok(header_dir) = env::var("RAPTOR_NATIVE_HEADER_DIR") {
        let header_dir = PathBuf::from(header_dir);
        let copied = fs::create_dir_all(&header_dir)
            .and_then(|_| fs::copy(&out_path, header_dir.join("raptor_native.h")));

        match copied {
            Ok(_) => println!(
                "cargo:warning=Header copied to {}",
                header_dir.join("raptor_native.h").display()
            ),
            Err(e) => println!(
                "cargo:warning=Failed to copy header to {}: {}",
                header_dir.display(),
                e
            ),
        }
    }
}
