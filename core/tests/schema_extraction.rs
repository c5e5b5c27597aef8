use kubefields_core::{extract_to_csv, ApiKind, SchemaLayout, SchemaLocator};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;

fn apps_bundle() -> String {
    json!({
        "openapi": "3.0.0",
        "components": {
            "schemas": {
                "io.k8s.api.apps.v1.Deployment": {
                    "description": "Deployment enables declarative updates for Pods and ReplicaSets.",
                    "type": "object",
                    "properties": {
                        "apiVersion": {"type": "string"},
                        "kind": {"type": "string"},
                        "metadata": {
                            "allOf": [{"$ref": "#/components/schemas/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"}],
                            "default": {},
                            "description": "Standard object's metadata."
                        },
                        "spec": {
                            "type": "object",
                            "required": ["selector", "template"],
                            "properties": {
                                "replicas": {"type": "integer", "format": "int32"},
                                "selector": {"$ref": "#/components/schemas/io.k8s.apimachinery.pkg.apis.meta.v1.LabelSelector"},
                                "template": {
                                    "allOf": [
                                        {"properties": {"labels": {"type": "object"}}}
                                    ]
                                },
                                "conditions": {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "required": ["type"],
                                        "properties": {
                                            "type": {"type": "string"},
                                            "kind": {"type": "string"}
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
    .to_string()
}

#[test]
fn test_schema_mode_writes_description_table() {
    let dir = tempfile::tempdir().unwrap();
    let bundles = dir.path().join("api/openapi-spec/v3");
    fs::create_dir_all(&bundles).unwrap();
    fs::write(bundles.join("apis__apps__v1_openapi.json"), apps_bundle()).unwrap();

    let input = dir.path().join("kinds.csv");
    fs::write(&input, "APIGroup,Kind,Version\napps,Deployment,v1\napps,StatefulSet,v1\n").unwrap();
    let output = dir.path().join("out/fields.csv");

    let locator = SchemaLocator::new(SchemaLayout::in_dir(&bundles));
    let summary = extract_to_csv(&input, &output, &locator).unwrap();
    assert_eq!(summary.found, 1);
    assert_eq!(
        summary.missing,
        vec![ApiKind::new("apps", "StatefulSet").with_version("v1")]
    );

    let text = fs::read_to_string(&output).unwrap();
    let expected = "\
APIGroup,Kind,Field,Type,JSONTag,Optional,Description
apps,Deployment,metadata,io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta,metadata,true,Standard object's metadata.
apps,Deployment,spec,object,spec,true,
apps,Deployment,spec.replicas,integer,replicas,true,
apps,Deployment,spec.selector,io.k8s.apimachinery.pkg.apis.meta.v1.LabelSelector,selector,false,
apps,Deployment,spec.template,,template,false,
apps,Deployment,spec.template.labels,object,labels,true,
apps,Deployment,spec.conditions,array of object,conditions,true,
apps,Deployment,spec.conditions[].type,string,type,false,
apps,Deployment,spec.conditions[].kind,string,kind,true,
";
    assert_eq!(text, expected);
}

#[test]
fn test_missing_bundle_directory_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("kinds.csv");
    fs::write(&input, "APIGroup,Kind\n,Pod\n").unwrap();
    let output = dir.path().join("fields.csv");

    let locator = SchemaLocator::new(SchemaLayout::in_dir(dir.path().join("nowhere")));
    let summary = extract_to_csv(&input, &output, &locator).unwrap();
    assert_eq!(summary.records, 0);
    assert_eq!(summary.missing.len(), 1);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "APIGroup,Kind,Field,Type,JSONTag,Optional,Description\n"
    );
}
