use std::env;
use std::fs;
use std::path::PathBuf;

#[toml_cfg::toml_config]
pub struct Config {
    #[default(1000.0)]
    baseline_millivolts: f32,
    #[default(0x48)]
    adc_address: u8,
}

fn main() {
    if !std::path::Path::new("cfg.toml").exists() {
        panic!("You need to create a `cfg.toml` file with the sensor calibration! Use `cfg.toml.example` as a template.");
    }

    let app_config = CONFIG;
    if app_config.baseline_millivolts <= 0.0 {
        panic!("`baseline_millivolts` in `cfg.toml` must be positive");
    }
    if !(0x48..=0x4b).contains(&app_config.adc_address) {
        panic!("`adc_address` in `cfg.toml` must be one of the ADS1115 addresses 72..=75");
    }

    let target = env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumbv") {
        let out = PathBuf::from(env::var("OUT_DIR").unwrap());
        fs::write(out.join("memory.x"), include_bytes!("memory.x")).unwrap();
        println!("cargo:rustc-link-search={}", out.display());
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=cfg.toml");
    println!("cargo:rerun-if-changed=build.rs");
}
