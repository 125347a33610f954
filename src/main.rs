use allods_assets::allods::utils;
use allods_assets::{
    AssetLoader, DirectorySource, LoaderOptions, RegistryValue, SpriteFormat,
};
use std::env;

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} <asset-root> <logical-path> [--encoding <LABEL>] [--palette-offset <N>] [--dump]",
        program
    );
    std::process::exit(1);
}

fn parse_offset(text: &str) -> Option<u64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
    }

    let root = &args[1];
    let asset_path = &args[2];
    let mut options = LoaderOptions::default();

    // Parse --encoding argument
    if let Some(idx) = args.iter().position(|arg| arg == "--encoding") {
        match args.get(idx + 1) {
            Some(label) => options.encoding = utils::parse_encoding(label),
            None => {
                eprintln!("ERROR: --encoding flag requires an argument.");
                std::process::exit(1);
            }
        }
    }
    // Parse --palette-offset argument
    if let Some(idx) = args.iter().position(|arg| arg == "--palette-offset") {
        match args.get(idx + 1).and_then(|s| parse_offset(s)) {
            Some(offset) => options.palette_offset = offset,
            None => {
                eprintln!("ERROR: --palette-offset expects a decimal or 0x-prefixed number.");
                std::process::exit(1);
            }
        }
    }
    let dump = args.iter().any(|arg| arg == "--dump");

    let loader = AssetLoader::with_options(DirectorySource::new(root), options);
    let lower = asset_path.to_ascii_lowercase();

    let outcome = if lower.ends_with(".reg") {
        print_registry(&loader, asset_path, dump)
    } else if lower.ends_with(".pal") || lower.ends_with(".bmp") {
        print_palette(&loader, asset_path)
    } else if lower.contains("font") && SpriteFormat::from_path(asset_path).is_ok() {
        print_font(&loader, asset_path)
    } else {
        print_sprite(&loader, asset_path)
    };

    if let Err(e) = outcome {
        eprintln!("\nERROR: Failed to read \"{}\"", asset_path);
        eprintln!("  {}", e);
        std::process::exit(1);
    }
}

fn print_sprite(loader: &AssetLoader<DirectorySource>, path: &str) -> allods_assets::Result<()> {
    let sprite = loader.load_sprite(path)?;
    let format = SpriteFormat::from_path(path)?;

    println!("Sprite: {}", path);
    println!("  Format: {}", format);
    println!("  Palette: {}", if sprite.palette.is_some() { "yes" } else { "no" });
    println!("  Frames: {}", sprite.len());
    println!("  Pixels: {}", sprite.pixel_count());
    for (i, frame) in sprite.frames.iter().enumerate().take(10) {
        let opaque = frame.pixels().iter().filter(|p| !p.is_transparent()).count();
        println!("  {}. {}x{} ({} written pixels)", i, frame.width(), frame.height(), opaque);
    }
    if sprite.len() > 10 {
        println!("  ... and {} more", sprite.len() - 10);
    }
    Ok(())
}

fn print_palette(loader: &AssetLoader<DirectorySource>, path: &str) -> allods_assets::Result<()> {
    let palette = loader.load_palette(path)?;
    println!("Palette: {} (offset {:#x})", path, loader.options().palette_offset);
    for (i, color) in palette.colors().iter().enumerate().take(16) {
        println!("  [{:3}] {}", i, color);
    }
    Ok(())
}

fn print_font(loader: &AssetLoader<DirectorySource>, path: &str) -> allods_assets::Result<()> {
    let font = loader.load_font(path)?;
    let (cell_w, cell_h) = font.cell_size();
    println!("Font: {}", path);
    println!("  Glyphs: {}", font.glyphs.len());
    println!("  Cell: {}x{}", cell_w, cell_h);
    let widths: Vec<String> = font.widths.0.iter().take(32).map(|w| w.to_string()).collect();
    println!("  Widths (0x20..): {}", widths.join(" "));
    Ok(())
}

fn print_registry(
    loader: &AssetLoader<DirectorySource>,
    path: &str,
    dump: bool,
) -> allods_assets::Result<()> {
    let tree = loader.load_registry(path)?;
    println!("Registry: {}", path);
    println!("  Sections: {}", tree.sections().len());
    println!("  Nodes: {}", tree.node_count());

    if dump {
        println!("{}", "=".repeat(60));
        for (depth, node) in tree.iter() {
            let indent = "  ".repeat(depth + 1);
            match &node.value {
                RegistryValue::Directory(children) => {
                    println!("{}[{}] ({} entries)", indent, node.name, children.len())
                }
                RegistryValue::String(text) => println!("{}{} = {:?}", indent, node.name, text),
                RegistryValue::Int(value) => println!("{}{} = {}", indent, node.name, value),
                RegistryValue::Float(value) => println!("{}{} = {}", indent, node.name, value),
                RegistryValue::IntArray(values) => println!("{}{} = {:?}", indent, node.name, values),
            }
        }
    }
    Ok(())
}
