//! Bones and rigs
//!
//! A rig is a flat list of bones. Bones name their parent instead of pointing
//! at a list position, so the list order carries no hierarchy information.

use crate::types::Transform;

/// A single bone of a rig.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    pub transform: Transform,
    /// Index into the model's object list, if a mesh shares this bone's name.
    pub associated_mesh: Option<u32>,
    /// Name of the parent bone. Root bones have none.
    pub parent: Option<String>,
}

impl Bone {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// An ordered list of bones making up one PR3R rig container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rig {
    pub bones: Vec<Bone>,
}

impl Rig {
    pub fn new(bones: Vec<Bone>) -> Self {
        Self { bones }
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Find a bone by name (first match)
    pub fn find(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }

    /// Bones without a parent
    pub fn roots(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter().filter(|b| b.is_root())
    }

    /// Bones whose parent is `name`, in list order
    pub fn children_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Bone> + 'a {
        self.bones
            .iter()
            .filter(move |b| b.parent.as_deref() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bone(name: &str, parent: Option<&str>) -> Bone {
        Bone {
            name: name.to_string(),
            transform: Transform::IDENTITY,
            associated_mesh: None,
            parent: parent.map(str::to_string),
        }
    }

    #[test]
    fn hierarchy_queries() {
        let rig = Rig::new(vec![
            bone("Hand", Some("Arm")),
            bone("Arm", Some("Root")),
            bone("Leg", Some("Root")),
            bone("Root", None),
        ]);

        let roots: Vec<_> = rig.roots().map(|b| b.name.as_str()).collect();
        assert_eq!(roots, vec!["Root"]);

        let children: Vec<_> = rig.children_of("Root").map(|b| b.name.as_str()).collect();
        assert_eq!(children, vec!["Arm", "Leg"]);

        assert_eq!(rig.find("Hand").unwrap().parent.as_deref(), Some("Arm"));
        assert!(rig.find("Tail").is_none());
        assert_eq!(rig.len(), 4);
    }
}
