fn main() {
    println!("cargo:rerun-if-changed=alarm.json");
    println!("cargo:rerun-if-changed=alarm.example.json");

    // Bundle the device configuration into the image. A local `alarm.json`
    // (not committed; holds credentials) wins over the checked-in example.
    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let source = if std::path::Path::new("alarm.json").exists() {
        "alarm.json"
    } else {
        println!("cargo:warning=alarm.json not found, bundling alarm.example.json");
        "alarm.example.json"
    };
    std::fs::copy(source, std::path::Path::new(&out_dir).join("alarm.json"))
        .expect("failed to bundle alarm configuration");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
