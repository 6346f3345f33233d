//! Parse a small document, navigate it, and print its canonical form.

use libyamlet::{parse, serialize, SerializeConfig};

fn main() {
    let data = "\
service: demo
listen:
  host: 127.0.0.1
  port: 9000
notes: |
  First line of notes.
  Second line of notes.
backends:
  - name: alpha
    weight: 3
  - name: beta
    weight: 1
";

    let root = match parse(data) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("parse error ({:?}): {}", e.category(), e);
            std::process::exit(1);
        }
    };

    println!("service = {}", root["service"].as_str());
    println!("port    = {}", root["listen"]["port"].as_i64().unwrap_or(0));
    for (index, (_, backend)) in root["backends"].iter().enumerate() {
        println!(
            "backend {} = {} (weight {})",
            index,
            backend["name"].as_str(),
            backend["weight"].as_str()
        );
    }

    let text = serialize(&root, &SerializeConfig::default()).unwrap();
    println!("--- canonical form ---");
    print!("{}", text);
}
