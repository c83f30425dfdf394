mod common;

#[test]
fn test_generate_simple_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("employees.csv");
    common::generate_employees_csv(&output_path, 5).expect("Failed to generate CSV");

    let content = std::fs::read_to_string(&output_path).expect("Failed to read file");
    // Header + 5 rows = 6 lines
    assert_eq!(content.lines().count(), 6);
    assert!(content.starts_with("first_name,last_name,email,"));
}

#[test]
fn test_generate_mixed_status_distribution() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("mixed.csv");
    common::generate_mixed_status_csv(&output_path, 40).expect("Failed to generate CSV");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&output_path)
        .expect("Failed to open CSV");

    let mut active = 0;
    let mut departments = std::collections::HashSet::new();
    for result in reader.records() {
        let record = result.expect("Failed to read record");
        let department: i64 = record[6].parse().expect("Failed to parse department id");
        assert!((1..=5).contains(&department));
        departments.insert(department);
        if &record[8] == "ACTIVE" {
            active += 1;
        }
    }

    assert_eq!(active, 10);
    assert_eq!(departments.len(), 5);
}
