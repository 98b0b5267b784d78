use std::collections::BTreeMap;

use apiproxy_core::expressions::{placeholders, substitute};
use apiproxy_core::{
    merge_vars, parse_templates, DataFormat, Definition, Parse, Template, ValidationError, VarSpec,
    Vars,
};

fn vars(pairs: &[(&str, &str)]) -> Vars {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn weather_template() -> Template {
    Template {
        name: "city-weather".to_string(),
        api: Definition::new("", "GET", "https://wttr.in/{{city}}"),
        url: true,
        vars: vec![VarSpec::new("city").with_default("Beijing")],
        ..Default::default()
    }
}

#[test]
fn template_parse_requires_name() {
    let mut t = weather_template();
    t.name = " ".to_string();
    assert_eq!(t.parse(), Err(ValidationError::MissingName));
}

#[test]
fn template_parse_checks_unflagged_method_and_target() {
    let mut t = weather_template();
    t.api.method = "INVALID".to_string();
    assert!(matches!(t.parse(), Err(ValidationError::InvalidMethod(_))));

    let mut t = weather_template();
    t.url = false;
    t.api.url.clear();
    assert_eq!(t.parse(), Err(ValidationError::MissingTarget));
}

#[test]
fn template_parse_exempts_flagged_method_and_target() {
    let mut t = Template {
        name: "dynamic".to_string(),
        api: Definition::new("", "{{ method }}", ""),
        method: true,
        url: true,
        ..Default::default()
    };
    t.parse().unwrap();
    assert_eq!(t.api.method, "{{ method }}");
}

#[test]
fn template_parse_normalizes_unflagged_method() {
    let mut t = weather_template();
    t.api.method = " get ".to_string();
    t.parse().unwrap();
    assert_eq!(t.api.method, "GET");
}

#[test]
fn template_parse_requires_listed_headers_and_flagged_body() {
    let mut t = weather_template();
    t.headers.insert("Authorization".to_string(), true);
    assert_eq!(t.parse(), Err(ValidationError::MissingHeader("Authorization".to_string())));

    let mut t = weather_template();
    t.body = true;
    assert_eq!(t.parse(), Err(ValidationError::MissingBody));
}

#[test]
fn template_parse_validates_var_specs() {
    let mut t = weather_template();
    t.vars.push(VarSpec::new(""));
    assert_eq!(t.parse(), Err(ValidationError::MissingVariableName));

    let mut t = weather_template();
    t.vars = vec![VarSpec::new("city").with_options(["London", "Paris"]).with_default("Beijing")];
    assert!(matches!(t.parse(), Err(ValidationError::InvalidDefaultOption { .. })));

    let mut t = weather_template();
    t.vars = vec![VarSpec::new("city").with_options(["London", "Beijing"]).with_default("Beijing")];
    t.parse().unwrap();
}

#[test]
fn template_parse_turns_defaults_into_var_specs() {
    let mut t = weather_template();
    t.vars.clear();
    t.defaults = BTreeMap::from([
        ("city".to_string(), "Beijing".to_string()),
        ("lang".to_string(), "en".to_string()),
    ]);
    t.parse().unwrap();
    assert!(t.defaults.is_empty());
    let names: Vec<&str> = t.vars.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["city", "lang"]);
    assert_eq!(t.vars[0].default.as_deref(), Some("Beijing"));
}

#[test]
fn template_parse_keeps_declared_var_over_default_entry() {
    let mut t = weather_template();
    t.defaults.insert("city".to_string(), "Tokyo".to_string());
    t.parse().unwrap();
    assert_eq!(t.vars.len(), 1);
    assert_eq!(t.vars[0].default.as_deref(), Some("Beijing"));
}

#[test]
fn merge_vars_uses_default_when_not_supplied() {
    let specs = [VarSpec::new("city").with_default("Beijing")];
    let merged = merge_vars(&specs, &Vars::new()).unwrap();
    assert_eq!(merged, vars(&[("city", "Beijing")]));
}

#[test]
fn merge_vars_rejects_supplied_empty_value() {
    let specs = [VarSpec::new("city").with_default("Beijing")];
    let err = merge_vars(&specs, &vars(&[("city", "")])).unwrap_err();
    assert_eq!(err, ValidationError::MissingRequiredVariable("city".to_string()));
}

#[test]
fn merge_vars_requires_undefaulted_vars() {
    let specs = [VarSpec::new("token")];
    let err = merge_vars(&specs, &Vars::new()).unwrap_err();
    assert_eq!(err, ValidationError::MissingRequiredVariable("token".to_string()));
}

#[test]
fn merge_vars_allows_empty_when_permitted() {
    let specs = [VarSpec::new("suffix").can_be_empty()];
    assert_eq!(merge_vars(&specs, &Vars::new()).unwrap(), vars(&[("suffix", "")]));
    assert_eq!(merge_vars(&specs, &vars(&[("suffix", "")])).unwrap(), vars(&[("suffix", "")]));
}

#[test]
fn merge_vars_enforces_options() {
    let specs = [VarSpec::new("lang").with_options(["en", "zh"])];
    assert_eq!(merge_vars(&specs, &vars(&[("lang", "zh")])).unwrap(), vars(&[("lang", "zh")]));
    let err = merge_vars(&specs, &vars(&[("lang", "fr")])).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidOption { ref var, ref value } if var == "lang" && value == "fr"));
}

#[test]
fn merge_vars_ignores_undeclared_names() {
    let specs = [VarSpec::new("city").with_default("Beijing")];
    let merged = merge_vars(&specs, &vars(&[("city", "London"), ("extra", "x")])).unwrap();
    assert_eq!(merged, vars(&[("city", "London")]));
}

#[test]
fn render_substitutes_url() {
    let mut t = weather_template();
    t.parse().unwrap();

    let d = t.render(&vars(&[("city", "London")])).unwrap();
    assert_eq!(d.url, "https://wttr.in/London");
    assert_eq!(d.method, "GET");
    assert!(d.name.starts_with("city-weather::"));

    let d = t.render(&Vars::new()).unwrap();
    assert_eq!(d.url, "https://wttr.in/Beijing");
}

#[test]
fn render_names_each_definition_uniquely() {
    let mut t = weather_template();
    t.parse().unwrap();
    let a = t.render(&Vars::new()).unwrap();
    let b = t.render(&Vars::new()).unwrap();
    assert_ne!(a.name, b.name);

    let c = t.render_with_id(&Vars::new(), "fixed").unwrap();
    assert_eq!(c.name, "city-weather::fixed");
}

#[test]
fn render_reports_missing_values_sorted_and_deduplicated() {
    let mut t = Template {
        name: "multi".to_string(),
        api: Definition::new("", "POST", "https://api.example.com/{{ zone }}/{{city}}/{{ zone }}"),
        url: true,
        body: true,
        ..Default::default()
    };
    t.api.body = r#"{"city":"{{city}}","a":"{{ alpha }}"}"#.to_string();
    t.parse().unwrap();

    let err = t.render(&Vars::new()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingVariableValues(vec![
            "alpha".to_string(),
            "city".to_string(),
            "zone".to_string(),
        ])
    );
}

#[test]
fn render_reports_single_missing_city() {
    let mut t = weather_template();
    t.vars.clear();
    t.parse().unwrap();
    let err = t.render(&vars(&[("city", "London")])).unwrap_err();
    assert_eq!(err, ValidationError::MissingVariableValues(vec!["city".to_string()]));
}

#[test]
fn render_leaves_unflagged_fields_verbatim() {
    let mut t = weather_template();
    t.api.headers.insert("X-Literal".to_string(), "{{city}}".to_string());
    t.api.headers.insert("Authorization".to_string(), "Bearer {{ token }}".to_string());
    t.headers.insert("Authorization".to_string(), true);
    t.vars.push(VarSpec::new("token").with_default("default-token"));
    t.parse().unwrap();

    let d = t.render(&Vars::new()).unwrap();
    assert_eq!(d.headers["X-Literal"], "{{city}}");
    assert_eq!(d.headers["Authorization"], "Bearer default-token");
}

#[test]
fn render_substitutes_every_fallback_url() {
    let mut t = Template {
        name: "geo".to_string(),
        api: Definition {
            method: "GET".to_string(),
            urls: vec![
                "https://a.example.com/{{ip}}".to_string(),
                "https://b.example.com/{{ip}}".to_string(),
            ],
            ..Default::default()
        },
        url: true,
        vars: vec![VarSpec::new("ip")],
        ..Default::default()
    };
    t.parse().unwrap();
    let d = t.render(&vars(&[("ip", "1.2.3.4")])).unwrap();
    assert_eq!(d.urls, ["https://a.example.com/1.2.3.4", "https://b.example.com/1.2.3.4"]);
    assert!(d.is_fallback());
}

#[test]
fn render_revalidates_the_result() {
    let mut t = Template {
        name: "dynamic".to_string(),
        api: Definition::new("", "{{method}}", "https://api.example.com"),
        method: true,
        vars: vec![VarSpec::new("method")],
        ..Default::default()
    };
    t.parse().unwrap();

    let err = t.render(&vars(&[("method", "FETCH")])).unwrap_err();
    assert_eq!(err, ValidationError::InvalidMethod("FETCH".to_string()));

    let d = t.render(&vars(&[("method", "post")])).unwrap();
    assert_eq!(d.method, "POST");
}

#[test]
fn render_drops_templated_body_for_get() {
    let mut t = weather_template();
    t.body = true;
    t.api.body = "{{city}}".to_string();
    t.parse().unwrap();
    let d = t.render(&Vars::new()).unwrap();
    assert!(d.body.is_empty());
}

#[test]
fn placeholders_accept_inner_whitespace() {
    assert_eq!(placeholders("{{a}}/{{ b-c }}/{{  d_1  }}/{{ e f }}"), ["a", "b-c", "d_1"]);

    let mut missing = Default::default();
    let out = substitute("{{ Name }} {{name}}", &vars(&[("name", "x")]), &mut missing);
    assert_eq!(out, "{{ Name }} x");
    assert!(missing.contains("Name"));
}

#[test]
fn substitute_inserts_values_literally() {
    let mut missing = Default::default();
    let out = substitute("{{v}}", &vars(&[("v", "$1 ${x}")]), &mut missing);
    assert_eq!(out, "$1 ${x}");
    assert!(missing.is_empty());
}

#[test]
fn parse_templates_from_yaml() {
    let yaml = r#"
- name: test-api-template1
  api:
    method: "{{ method }}"
    url: "{{ url }}"
    headers:
      "Content-Type": "{{ content-type }}"
  method: true
  url: true
  headers:
    Content-Type: true
  defaults:
    method: GET
    content-type: application/json
    url: https://api.example.com
- name: weather
  api:
    method: GET
    url: https://wttr.in/{{ city }}
  url: true
  vars:
    - name: city
      options: [London, Beijing]
      default: Beijing
    - name: lang
      canEmpty: true
"#;
    let mut templates = parse_templates(yaml.as_bytes(), DataFormat::Yaml).unwrap();
    assert_eq!(templates.len(), 2);
    for t in templates.iter_mut() {
        t.parse().unwrap();
    }

    let d = templates[0].render(&Vars::new()).unwrap();
    assert_eq!(d.method, "GET");
    assert_eq!(d.url, "https://api.example.com");
    assert_eq!(d.headers["Content-Type"], "application/json");

    assert!(templates[1].vars[1].can_empty);
    let err = templates[1].render(&vars(&[("city", "Paris")])).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidOption { .. }));
}
