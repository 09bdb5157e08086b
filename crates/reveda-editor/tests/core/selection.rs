use reveda_editor::model::ItemId;
use reveda_editor::selection::{ItemCycler, SelectionOp, SelectionSet};

#[test]
fn test_selection_keeps_order() {
    let mut set = SelectionSet::new();
    set.replace([ItemId(3), ItemId(1)]);
    set.apply(SelectionOp::Add, [ItemId(2)]);
    assert_eq!(set.to_vec(), vec![ItemId(3), ItemId(1), ItemId(2)]);

    set.apply(SelectionOp::Toggle, [ItemId(1)]);
    assert_eq!(set.to_vec(), vec![ItemId(3), ItemId(2)]);

    set.apply(SelectionOp::Remove, [ItemId(3)]);
    assert_eq!(set.to_vec(), vec![ItemId(2)]);

    set.apply(SelectionOp::Replace, [ItemId(5)]);
    assert_eq!(set.to_vec(), vec![ItemId(5)]);
}

#[test]
fn test_cycler_wraps() {
    let mut cycler = ItemCycler::new(vec![ItemId(9), ItemId(4), ItemId(1)]);
    assert_eq!(cycler.current(), Some(ItemId(9)));
    assert_eq!(cycler.advance(), Some(ItemId(4)));
    assert_eq!(cycler.advance(), Some(ItemId(1)));
    assert_eq!(cycler.advance(), Some(ItemId(9)));

    cycler.retain(|id| id != ItemId(4));
    assert_eq!(cycler.len(), 2);
}
