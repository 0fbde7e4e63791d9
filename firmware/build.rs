//! Build script for the board image.
//!
//! Places `memory.x` on the linker search path and embeds the network
//! configuration: `network.cfg` at the repository root (or the template when
//! it does not exist yet) with environment variables layered on top.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use netconfig::{EnvSource, Key, KeyValueText, Layered, NetworkConfig, snapshot};

const CONFIG_FILE: &str = "network.cfg";
const TEMPLATE_FILE: &str = "network.example.cfg";

fn main() {
    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let manifest_dir =
        PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));

    link_memory_layout(&out, &manifest_dir);
    embed_network_config(&out, &manifest_dir);
}

fn link_memory_layout(out: &Path, manifest_dir: &Path) {
    fs::copy(manifest_dir.join("memory.x"), out.join("memory.x")).expect("copy memory.x");
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

fn embed_network_config(out: &Path, manifest_dir: &Path) {
    let root = manifest_dir.parent().unwrap_or(manifest_dir);
    let config_path = root.join(CONFIG_FILE);
    let template_path = root.join(TEMPLATE_FILE);
    println!("cargo:rerun-if-changed={}", config_path.display());
    println!("cargo:rerun-if-changed={}", template_path.display());
    for key in Key::ALL {
        println!("cargo:rerun-if-env-changed={}", key.name());
    }

    let text = match fs::read_to_string(&config_path) {
        Ok(text) => text,
        Err(_) => {
            println!(
                "cargo:warning={CONFIG_FILE} not found, copy {TEMPLATE_FILE} to {CONFIG_FILE} and fill it in"
            );
            fs::read_to_string(&template_path).expect("read network.example.cfg")
        }
    };

    let source = Layered::new(EnvSource, KeyValueText::new(&text));
    let mut merged = String::new();
    if let Err(err) = snapshot(&source, &mut merged) {
        // keep the file verbatim so the board reports the same problem at boot
        println!("cargo:warning=network configuration: {err}");
        merged = text.clone();
    }

    if let Err(err) = NetworkConfig::load(&KeyValueText::new(&merged)) {
        println!("cargo:warning=network configuration: {err}, the board will refuse to start");
    }

    fs::write(out.join(CONFIG_FILE), merged).expect("write embedded network configuration");
}
