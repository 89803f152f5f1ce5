//! Object mapping between a model and its DTOs.
//!
//! "Map to a new value" is plain `From`: `From<AddDto> for Model` and `From<&Model> for GetDto`.
//! "Map onto an existing value" is [`MergeInto`].

/// Copy the fields of `self` onto an existing instance, leaving fields it does not cover untouched.
pub trait MergeInto<M> {
    fn merge_into(self, target: &mut M);
}

/// Map every model in `models` to its read shape.
pub fn map_all<M, G>(models: &[M]) -> Vec<G>
where
    G: for<'a> From<&'a M>,
{
    models.iter().map(G::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Model {
        id: i64,
        name: String,
        secret: String,
    }

    struct View {
        id: i64,
        name: String,
    }

    impl From<&Model> for View {
        fn from(m: &Model) -> Self {
            View {
                id: m.id,
                name: m.name.clone(),
            }
        }
    }

    struct Rename {
        name: String,
    }

    impl MergeInto<Model> for Rename {
        fn merge_into(self, target: &mut Model) {
            target.name = self.name;
        }
    }

    #[test]
    fn merge_leaves_other_fields() {
        let mut model = Model {
            id: 1,
            name: "a".into(),
            secret: "s".into(),
        };
        Rename { name: "b".into() }.merge_into(&mut model);
        assert_eq!(model.name, "b");
        assert_eq!(model.secret, "s");
        assert_eq!(model.id, 1);
    }

    #[test]
    fn map_all_preserves_order() {
        let models = vec![
            Model {
                id: 2,
                name: "x".into(),
                secret: String::new(),
            },
            Model {
                id: 1,
                name: "y".into(),
                secret: String::new(),
            },
        ];
        let views: Vec<View> = map_all(&models);
        assert_eq!(views.iter().map(|v| v.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(views[1].name, "y");
    }
}
