use chained_table::{attributes, HashTable};

const NAMES: [&str; 14] = [
    "Jonny",
    "Reka",
    "Richardt",
    "Rånny",
    "Turid",
    "Laila",
    "Kenneth",
    "Pølsa",
    "Hjørdis",
    "Peder",
    "Finn-Åge",
    "Gjerdrun",
    "Finnlugg",
    "Jesus Kristus",
];

fn demo_table() -> HashTable {
    let mut t = HashTable::new(5).unwrap();
    for (i, name) in NAMES.iter().enumerate() {
        let sex = if i % 2 == 0 { "M" } else { "F" };
        t.insert(*name, attributes! { "age" => 27 + i as i64, "sex" => sex })
            .unwrap();
    }
    t
}

#[test]
fn one_line_per_bucket() {
    let t = demo_table();
    let out = t.to_string();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), t.capacity() + 2);
    assert_eq!(lines[0], "HashTable(");
    assert_eq!(lines[lines.len() - 1], ")");
    for (i, line) in lines[1..=t.capacity()].iter().enumerate() {
        assert!(line.starts_with(&format!("\t{i} --- ")), "bad line {line:?}");
    }
}

#[test]
fn cells_follow_chain_order_and_align() {
    let t = demo_table();
    let width = "Jesus Kristus".chars().count() + 2;
    let out = t.to_string();
    for (i, line) in out.lines().skip(1).take(t.capacity()).enumerate() {
        let body = &line[format!("\t{i} --- ").len()..];
        let cells: Vec<&str> = body.split(" --- ").collect();
        let bucket = t.bucket(i).unwrap();
        if bucket.is_empty() {
            assert_eq!(cells, [" ".repeat(width)]);
            continue;
        }
        let keys: Vec<&str> = bucket.iter().map(|e| e.key()).collect();
        assert_eq!(cells.len(), keys.len());
        for (cell, key) in cells.iter().zip(keys) {
            assert_eq!(cell.chars().count(), width);
            assert_eq!(cell.trim(), key);
        }
    }
}

#[test]
fn every_key_rendered_once() {
    let mut t = demo_table();
    t.remove("Finn-Åge").unwrap();
    let out = t.to_string();
    let cells: Vec<&str> = out
        .lines()
        .skip(1)
        .take(t.capacity())
        .enumerate()
        .flat_map(|(i, line)| line[format!("\t{i} --- ").len()..].split(" --- "))
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect();
    assert_eq!(cells.len(), NAMES.len() - 1);
    for name in NAMES.iter().filter(|n| **n != "Finn-Åge") {
        let hits = cells.iter().filter(|cell| *cell == name).count();
        assert_eq!(hits, 1, "{name} should appear once in\n{out}");
    }
    assert!(!out.contains("Finn-Åge"));
}
