use crate::{
    ast::{
        selection_set::{FieldSelection, SelectionSet},
        value::{Value, VariableRef},
    },
    compiler::{compile_operation, error::CompileError},
    document::OperationKind,
    tests::testkit::{assert_equivalent, init_logger, pipelines_builder, read_selection},
};

#[test]
fn literal_argument_without_variables() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let builder = pipelines_builder();

    let document = builder.build_query(None, |root| {
        SelectionSet::from_iter([root
            .field("pipeline")
            .argument("slug", "foo")
            .select(["id", "name"])])
    })?;

    insta::assert_snapshot!(document, @r#"query {pipeline(slug:"foo"){id name } }"#);
    assert!(document.variable_definitions().is_empty());
    assert_eq!(document.variable_preamble(), "");
    assert_equivalent(
        &document,
        r#"
        query {
          pipeline(slug: "foo") {
            id
            name
          }
        }"#,
    );

    Ok(())
}

#[test]
fn required_variable_is_hoisted_into_preamble() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let builder = pipelines_builder();

    let document = builder.build_query(Some("Pipeline"), |root| {
        SelectionSet::from_iter([root
            .field("pipeline")
            .argument("slug", VariableRef::required("slug"))
            .select(["id", "name"])])
    })?;

    insta::assert_snapshot!(document, @"query Pipeline($slug:ID!){pipeline(slug:$slug){id name } }");
    assert_eq!(document.variable_preamble(), "($slug:ID!)");
    assert_equivalent(
        &document,
        r#"
        query Pipeline($slug: ID!) {
          pipeline(slug: $slug) {
            id
            name
          }
        }"#,
    );

    Ok(())
}

#[test]
fn unknown_argument_fails_before_any_text_is_returned() {
    init_logger();
    let builder = pipelines_builder();

    let result = builder.build_query(None, |root| {
        SelectionSet::from_iter([root
            .field("pipeline")
            .argument("slug", "foo")
            .argument("branch", "main")
            .select(["id"])])
    });

    let error = result.expect_err("an undeclared argument must be rejected");
    assert_eq!(
        error,
        CompileError::Schema {
            path: "Query.pipeline.branch".to_string(),
            message: "argument 'branch' is not declared for field 'pipeline'".to_string(),
        }
    );
    insta::assert_snapshot!(error, @"Schema error at 'Query.pipeline.branch': argument 'branch' is not declared for field 'pipeline'");
}

#[test]
fn mutation_with_nested_input_object() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let builder = pipelines_builder();

    let document = builder.build_mutation(Some("CreatePipeline"), |root| {
        SelectionSet::from_iter([root
            .field("pipelineCreate")
            .argument(
                "input",
                Value::object([
                    ("organizationId", Value::from(VariableRef::required("org"))),
                    ("name", Value::from("web")),
                    (
                        "repository",
                        Value::object([("url", "git@github.com:acme/web.git")]),
                    ),
                    ("visibility", Value::from("PRIVATE")),
                    ("tags", Value::from(vec![Value::object([("label", "ci")])])),
                ]),
            )
            .select([FieldSelection::new("pipeline").select(["id", "slug"])])])
    })?;

    insta::assert_snapshot!(document, @r#"mutation CreatePipeline($org:ID!){pipelineCreate(input:{organizationId:$org,name:"web",repository:{url:"git@github.com:acme/web.git"},visibility:PRIVATE,tags:[{label:"ci"}]}){pipeline{id slug } } }"#);
    assert_equivalent(
        &document,
        r#"
        mutation CreatePipeline($org: ID!) {
          pipelineCreate(
            input: {
              organizationId: $org
              name: "web"
              repository: { url: "git@github.com:acme/web.git" }
              visibility: PRIVATE
              tags: [{ label: "ci" }]
            }
          ) {
            pipeline {
              id
              slug
            }
          }
        }"#,
    );

    Ok(())
}

#[test]
fn compiles_selection_tree_handed_over_as_json() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let builder = pipelines_builder();
    let selection = read_selection("fixture/tests/pipeline.selection.json");

    let document = builder.build_query(Some("Pipeline"), |_| selection)?;

    insta::assert_snapshot!(document, @"query Pipeline($slug:ID!){pipeline(slug:$slug){id name builds(state:PASSED,first:5){edges{node{number } } } } }");

    Ok(())
}

#[test]
fn json_tree_takes_root_argument_types_from_metadata() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let builder = pipelines_builder();
    let selection = read_selection("fixture/tests/pipelines.selection.json");

    let document = compile_operation(
        builder.schema(),
        OperationKind::Query,
        Some("Pipelines"),
        &selection,
    )?;

    insta::assert_snapshot!(document, @"query Pipelines($term:String,$slug:ID!){pipelines(visibility:PRIVATE,search:$term,first:10){id slug } current:pipeline(slug:$slug){name } }");
    assert_eq!(
        document,
        builder.build_query(Some("Pipelines"), |_| selection.clone())?
    );
    assert_equivalent(
        &document,
        r#"
        query Pipelines($term: String, $slug: ID!) {
          pipelines(visibility: PRIVATE, search: $term, first: 10) {
            id
            slug
          }
          current: pipeline(slug: $slug) {
            name
          }
        }"#,
    );

    Ok(())
}

#[test]
fn compile_operation_types_root_variables_from_metadata() -> Result<(), CompileError> {
    init_logger();
    let builder = pipelines_builder();
    let selection = SelectionSet::from_iter([FieldSelection::new("pipeline")
        .argument("slug", VariableRef::new("slug"))
        .select(["id", "name"])]);

    let document = compile_operation(
        builder.schema(),
        OperationKind::Query,
        Some("Pipeline"),
        &selection,
    )?;

    insta::assert_snapshot!(document, @"query Pipeline($slug:ID!){pipeline(slug:$slug){id name } }");

    Ok(())
}

#[test]
fn compile_operation_rejects_undeclared_root_argument() {
    init_logger();
    let builder = pipelines_builder();
    let selection = SelectionSet::from_iter([FieldSelection::new("pipelines")
        .argument("visibility", "PRIVATE")
        .argument("bogus", 1)
        .select(["id"])]);

    let from_tree = compile_operation(builder.schema(), OperationKind::Query, None, &selection);
    let from_builder = builder.build_query(None, |root| {
        SelectionSet::from_iter([root
            .field("pipelines")
            .argument("visibility", "PRIVATE")
            .argument("bogus", 1)
            .select(["id"])])
    });

    let expected = CompileError::Schema {
        path: "Query.pipelines.bogus".to_string(),
        message: "argument 'bogus' is not declared for field 'pipelines'".to_string(),
    };
    assert_eq!(from_tree, Err(expected.clone()));
    assert_eq!(from_builder, Err(expected));
}

#[test]
fn explicit_argument_types_win_over_metadata() -> Result<(), CompileError> {
    init_logger();
    let builder = pipelines_builder();
    let selection = SelectionSet::from_iter([FieldSelection::new("pipeline")
        .argument("slug", VariableRef::new("slug"))
        .argument_type("slug", "String")
        .select(["id"])]);

    let document = compile_operation(builder.schema(), OperationKind::Query, None, &selection)?;

    insta::assert_snapshot!(document, @"query ($slug:String){pipeline(slug:$slug){id } }");

    Ok(())
}

#[test]
fn compilations_share_nothing() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let builder = pipelines_builder();

    let documents = std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|i| {
                let builder = &builder;
                scope.spawn(move || {
                    builder.build_query(None, |root| {
                        SelectionSet::from_iter([root
                            .field("pipeline")
                            .argument("slug", VariableRef::new(format!("slug{}", i)))
                            .select(["id"])])
                    })
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("compilation thread panicked"))
            .collect::<Result<Vec<_>, _>>()
    })?;

    for (i, document) in documents.iter().enumerate() {
        assert_eq!(
            document.to_string(),
            format!("query ($slug{i}:ID!){{pipeline(slug:$slug{i}){{id }} }}")
        );
    }

    Ok(())
}
