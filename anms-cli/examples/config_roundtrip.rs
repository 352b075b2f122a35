use anms_harris::{BoundaryMode, DetectorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔧 Detector Configuration Round Trip");
    println!("====================================\n");

    let configs = vec![
        DetectorConfig::exact_preset(480, 640),
        DetectorConfig::sparse_preset(480, 640),
        DetectorConfig::dense_preset(480, 640),
        {
            let mut custom = DetectorConfig::new(480, 640)
                .with_metadata("Custom", "Zero-padded borders, tighter suppression");
            custom.conv_mode = BoundaryMode::Fill(0.0);
            custom.anms.suppression_ratio = 0.8;
            custom
        },
    ];

    println!("   {:<10} {:<14} {:<10} {:<6} {:<6} {:<6}", "Name", "Strategy", "Mode", "N", "Ratio", "Edge");
    println!("   {}", "-".repeat(58));
    for config in &configs {
        println!(
            "   {:<10} {:<14} {:<10} {:<6} {:<6.2} {:<6}",
            config.name.as_deref().unwrap_or("-"),
            config.anms.strategy.to_string(),
            config.conv_mode.to_string(),
            config.anms.n_corners,
            config.anms.suppression_ratio,
            config.anms.edge
        );
    }

    println!("\n🔄 JSON / TOML round trip");
    for config in &configs {
        let from_json = DetectorConfig::from_json(&config.to_json()?)?;
        let from_toml = DetectorConfig::from_toml(&config.to_toml()?)?;
        assert_eq!(&from_json, config);
        assert_eq!(&from_toml, config);
        println!("   ✅ {}", config.summary());
    }

    let sparse = &configs[1];
    sparse.save_toml("sparse_config.toml")?;
    sparse.save_json("sparse_config.json")?;
    let loaded = DetectorConfig::load_toml("sparse_config.toml")?;
    println!("\n📁 Saved and reloaded sparse_config.toml / .json");
    println!("   {}", loaded.summary());

    Ok(())
}
