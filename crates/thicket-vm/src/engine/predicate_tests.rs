use indoc::indoc;

use crate::test_utils::parser;
use crate::{ParseOptions, PredicateError, RuntimeError};

const MATCHING_TAGS: &str = indoc! {"
    grammar Tags
      rule element
        '<' open:name '>' &{ same_name } body:[a-z]* '</' close:name '>' &{ closes_open }
      end

      rule name
        [a-z]+
      end
    end
"};

fn bind_tags(parser: &mut crate::CompiledParser) {
    parser
        .bind_predicate("same_name", |env| Ok(env.element(1).is_some()))
        .bind_predicate("closes_open", |env| {
            let open = env.label("open").map(|n| n.text_value());
            let close = env.label("close").map(|n| n.text_value());
            Ok(open.is_some() && open == close)
        });
}

#[test]
fn predicates_see_labeled_siblings() {
    let mut parser = parser(MATCHING_TAGS);
    bind_tags(&mut parser);

    assert!(
        parser
            .parse("<b>x</b>", ParseOptions::new())
            .unwrap()
            .is_some()
    );
    assert!(
        parser
            .parse("<b>x</i>", ParseOptions::new())
            .unwrap()
            .is_none()
    );
}

#[test]
fn unbound_predicate_is_an_error() {
    let mut parser = parser(MATCHING_TAGS);
    assert_eq!(parser.unbound_predicates(), vec!["same_name", "closes_open"]);

    let err = parser.parse("<b>x</b>", ParseOptions::new()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"no predicate bound for `same_name`");

    bind_tags(&mut parser);
    assert!(parser.unbound_predicates().is_empty());
}

#[test]
fn predicate_error_propagates() {
    let mut parser = parser(indoc! {"
        grammar T
          rule a
            'a' &{ explode } / 'a'
          end
        end
    "});
    parser.bind_predicate("explode", |_| Err(PredicateError::new("boom")));

    let err = parser.parse("a", ParseOptions::new()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"predicate `explode` failed: boom");
    assert!(matches!(err, RuntimeError::Predicate { ref hook, .. } if hook == "explode"));
}

#[test]
fn negated_predicate() {
    let mut parser = parser(indoc! {"
        grammar T
          rule a
            [a-z] !{ is_x }
          end
        end
    "});
    parser.bind_predicate("is_x", |env| {
        Ok(env.element(0).map(|n| n.text_value()) == Some("x"))
    });

    assert!(parser.parse("y", ParseOptions::new()).unwrap().is_some());
    assert!(parser.parse("x", ParseOptions::new()).unwrap().is_none());
}

#[test]
fn predicate_position_and_rest() {
    let mut parser = parser(indoc! {"
        grammar T
          rule a
            'ab' &{ at_two } .*
          end
        end
    "});
    parser.bind_predicate("at_two", |env| {
        Ok(env.position() == 2 && env.rest() == "cd" && env.input() == "abcd")
    });

    assert!(parser.parse("abcd", ParseOptions::new()).unwrap().is_some());
}

#[test]
fn predicate_sees_only_its_own_rule() {
    let mut parser = parser(indoc! {"
        grammar T
          rule a
            'x' b 'y'
          end

          rule b
            &{ count }
          end
        end
    "});
    parser.bind_predicate("count", |env| Ok(env.element_count() == 0));

    assert!(parser.parse("xy", ParseOptions::new()).unwrap().is_some());
}

#[test]
fn bind_key_ignores_surrounding_whitespace() {
    let mut parser = parser(indoc! {"
        grammar T
          rule a
            &{   spaced   } 'a'
          end
        end
    "});
    parser.bind_predicate("  spaced ", |_| Ok(true));

    assert!(parser.parse("a", ParseOptions::new()).unwrap().is_some());
    assert!(parser.unbind_predicate("spaced"));
    assert!(matches!(
        parser.parse("a", ParseOptions::new()),
        Err(RuntimeError::UnboundPredicate(_))
    ));
}
