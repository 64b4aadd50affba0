//! The upload page served at `/`.

const INDEX_PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Resume Screener</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; margin-top: 1rem; font-weight: 600; }
  input[type=text] { width: 100%; padding: .4rem; }
  button { margin-top: 1rem; margin-right: .5rem; padding: .5rem 1rem; }
  table { border-collapse: collapse; margin-top: 1rem; width: 100%; }
  th, td { border: 1px solid #ccc; padding: .3rem .6rem; text-align: left; }
  .warning { background: #fff4ce; padding: .6rem; margin-top: 1rem; }
  .skipped { color: #8a1f11; }
</style>
</head>
<body>
<h1>Resume Screener</h1>
<p>Upload resumes and filter candidates by required skills.</p>
<form id="screen-form" method="post" action="/api/v1/screen/csv" enctype="multipart/form-data">
  <label for="resumes">Upload Resumes (PDF)</label>
  <input id="resumes" name="resumes" type="file" accept=".pdf,application/pdf" multiple>
  <label for="skills">Enter Required Skills (comma-separated)</label>
  <input id="skills" name="skills" type="text" value="{default_skills}">
  <button type="button" id="analyze">Analyze</button>
  <button type="submit">Download Results (CSV)</button>
</form>
<div id="results"></div>
<script>
const form = document.getElementById("screen-form");
const results = document.getElementById("results");
const esc = (s) => String(s).replace(/[&<>"]/g, (c) => ({"&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;"}[c]));
document.getElementById("analyze").addEventListener("click", async () => {
  results.textContent = "Analyzing resumes...";
  const response = await fetch("/api/v1/screen", { method: "POST", body: new FormData(form) });
  const body = await response.json();
  if (!response.ok) {
    results.innerHTML = `<p class="warning">${esc(body.error.message)}</p>`;
    return;
  }
  let html = "<h2>Shortlisted Candidates</h2>";
  if (body.shortlisted.length === 0) {
    html += `<p class="warning">${esc(body.warning)}</p>`;
  } else {
    html += "<table><tr><th>Resume</th><th>Match_Score</th></tr>";
    for (const row of body.shortlisted) {
      html += `<tr><td>${esc(row.Resume)}</td><td>${row.Match_Score.toFixed(2)}</td></tr>`;
    }
    html += "</table>";
  }
  for (const s of body.skipped) {
    html += `<p class="skipped">Skipped ${esc(s.name)}: ${esc(s.reason)}</p>`;
  }
  results.innerHTML = html;
});
</script>
</body>
</html>
"#;

/// Renders the upload page with the skills input pre-filled.
pub fn render_index(default_skills: &str) -> String {
    INDEX_PAGE_TEMPLATE.replace("{default_skills}", &escape_html(default_skills))
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_prefills_default_skills() {
        let html = render_index("Python, SQL, Machine Learning");
        assert!(html.contains(r#"value="Python, SQL, Machine Learning""#));
        assert!(!html.contains("{default_skills}"));
    }

    #[test]
    fn test_index_escapes_skills() {
        let html = render_index(r#""><script>"#);
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }
}
