fn main() {
    // Scaffolding comes from uniffi::setup_scaffolding!() in src/uniffi_bindings.rs,
    // there is no UDL file to compile here.
    println!("cargo:rerun-if-changed=src/uniffi_bindings.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
