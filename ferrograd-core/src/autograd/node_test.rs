use super::*;
use crate::autograd::grad_mode::no_grad;
use crate::tensor::Tensor;
use crate::ops::arithmetic::add::AddOp;
use crate::ops::arithmetic::{add_op, mul_op};
use crate::utils::testing::{f64_const, f64_param};

#[test]
fn test_apply_op_records_node_and_rank() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0, 2.0], vec![2]);
    let b = f64_param(vec![3.0, 4.0], vec![2]);
    let c = add_op(&a, &b)?;
    let d = mul_op(&c, &a)?;

    assert_eq!(a.rank(), 0);
    assert_eq!(c.rank(), 1);
    assert_eq!(d.rank(), 2);
    assert!(!c.is_leaf());
    assert!(c.requires_grad());

    let node = c.creator().expect("c should have a creator");
    assert_eq!(node.name(), "add");
    assert_eq!(node.rank(), 1);
    assert_eq!(node.inputs().len(), 2);
    assert_eq!(node.num_outputs(), 1);
    assert_eq!(node.output(0).map(|v| v.id()), Some(c.id()));
    assert!(node.output(1).is_none());
    Ok(())
}

#[test]
fn test_apply_op_without_grad_inputs_returns_leaves() -> Result<(), FerrogradError> {
    let a = f64_const(vec![1.0], vec![1]);
    let b = f64_const(vec![2.0], vec![1]);
    let c = add_op(&a, &b)?;
    assert!(c.is_leaf());
    assert!(!c.requires_grad());
    assert_eq!(c.rank(), 0);
    assert_eq!(c.value()?.to_f64_vec(), vec![3.0]);
    Ok(())
}

#[test]
fn test_apply_op_under_no_grad_records_nothing() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0], vec![1]);
    let c = {
        let _guard = no_grad();
        add_op(&a, &a)?
    };
    assert!(c.is_leaf());
    assert!(!c.requires_grad());

    let d = add_op(&a, &a)?;
    assert!(!d.is_leaf());
    Ok(())
}

#[test]
fn test_forward_error_leaves_graph_untouched() {
    let a = f64_param(vec![1.0, 2.0], vec![2]);
    let b = f64_param(vec![1.0, 2.0, 3.0], vec![3]);
    let result = apply_op(AddOp, &[&a, &b]);
    assert!(matches!(result, Err(FerrogradError::BroadcastError { .. })));
    assert!(a.is_leaf());
    assert!(a.grad().is_none());
}

#[test]
fn test_node_refers_to_outputs_weakly() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0], vec![1]);
    let c = add_op(&a, &a)?;
    let node = c.creator().expect("creator");
    assert!(node.output(0).is_some());
    drop(c);
    assert!(node.output(0).is_none());
    // Inputs are held strongly.
    assert_eq!(node.inputs()[0].id(), a.id());
    Ok(())
}

#[test]
fn test_enter_backward_detects_reentrancy() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0], vec![1]);
    let c = add_op(&a, &a)?;
    let node = c.creator().expect("creator");
    {
        let _entry = node.enter_backward()?;
        assert_eq!(
            node.enter_backward().err(),
            Some(FerrogradError::GraphReentrancy {
                operation: "add".to_string()
            })
        );
    }
    assert!(node.enter_backward().is_ok());
    Ok(())
}

#[test]
fn test_apply_op_single_rejects_multiple_outputs() {
    #[derive(Debug)]
    struct Split;

    impl Operation for Split {
        fn name(&self) -> &'static str {
            "split"
        }

        fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
            Ok(vec![inputs[0].clone(), inputs[0].clone()])
        }

        fn backward(
            &self,
            _ctx: &crate::autograd::BackwardContext<'_>,
            _grad_outputs: &[Option<Variable>],
        ) -> Result<Vec<Option<Variable>>, FerrogradError> {
            Ok(vec![None])
        }
    }

    let a = f64_param(vec![1.0], vec![1]);
    assert!(matches!(
        apply_op_single(Split, &[&a]),
        Err(FerrogradError::InternalError(_))
    ));
    let outputs = apply_op(Split, &[&a]).expect("split forward");
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[1].output_index(), 1);
}

#[test]
fn test_debug_format() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0], vec![1]);
    let c = add_op(&a, &a)?;
    let node = c.creator().expect("creator");
    let text = format!("{:?}", node);
    assert!(text.contains("OpNode"));
    assert!(text.contains("rank: 1"));
    Ok(())
}
