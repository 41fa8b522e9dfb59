pub fn render_schema(vector_dim: u32) -> String {
	let init = include_str!("../../../sql/init.sql");
	let expanded = expand_includes(init);

	expanded.replace("<VECTOR_DIM>", &vector_dim.to_string())
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_datasets.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_datasets.sql")),
				"tables/002_dataset_values.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_dataset_values.sql")),
				"tables/003_dataset_embeddings.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_dataset_embeddings.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_the_vector_dimension_into_the_schema() {
		let sql = render_schema(768);

		assert!(sql.contains("vector(768)"));
		assert!(!sql.contains("<VECTOR_DIM>"));
		assert!(!sql.contains("\\ir"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS datasets"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS dataset_values"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS dataset_embeddings"));
	}
}
